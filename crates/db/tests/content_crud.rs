//! Repository tests against a real database.
//!
//! Run with `DATABASE_URL` pointing at a PostgreSQL server the test user may
//! create databases on, and `--ignored`.

use masjid_core::settings::UpdateSettings;
use masjid_db::models::announcement::CreateAnnouncement;
use masjid_db::models::financial_report::CreateFinancialReport;
use masjid_db::models::quran_verse::CreateQuranVerse;
use masjid_db::repositories::{AnnouncementRepo, FinancialReportRepo, QuranVerseRepo, SettingsRepo};
use masjid_db::{PgSettingsStore, SettingsStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn announcement(text: &str, priority: i32, active: bool) -> CreateAnnouncement {
    CreateAnnouncement {
        text: text.to_string(),
        priority,
        active,
    }
}

fn report(previous: f64, income: f64, expenses: f64) -> CreateFinancialReport {
    CreateFinancialReport {
        previous_balance: previous,
        weekly_income: income,
        expenses,
        period: "Oktober 2026".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn announcements_are_sorted_by_priority_and_filtered(pool: PgPool) {
    AnnouncementRepo::create(&pool, &announcement("Kajian Ahad", 1, true))
        .await
        .unwrap();
    AnnouncementRepo::create(&pool, &announcement("Sholat Jumat", 5, true))
        .await
        .unwrap();
    AnnouncementRepo::create(&pool, &announcement("Arsip", 9, false))
        .await
        .unwrap();

    let active = AnnouncementRepo::list(&pool, true).await.unwrap();
    let texts: Vec<_> = active.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, ["Sholat Jumat", "Kajian Ahad"]);

    let all = AnnouncementRepo::list(&pool, false).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].text, "Arsip");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn deleting_an_announcement_reports_whether_it_existed(pool: PgPool) {
    let created = AnnouncementRepo::create(&pool, &announcement("Infaq", 1, true))
        .await
        .unwrap();

    assert!(AnnouncementRepo::delete(&pool, created.id).await.unwrap());
    assert!(!AnnouncementRepo::delete(&pool, created.id).await.unwrap());
    assert!(AnnouncementRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Quran verses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn inactive_verses_are_hidden_by_default(pool: PgPool) {
    let verse = |reference: &str, active| CreateQuranVerse {
        arabic: "إِنَّ مَعَ الْعُسْرِ يُسْرًا".to_string(),
        translation: "Sesungguhnya bersama kesulitan ada kemudahan.".to_string(),
        reference: reference.to_string(),
        active,
    };
    QuranVerseRepo::create(&pool, &verse("QS. Al-Insyirah: 6", true))
        .await
        .unwrap();
    QuranVerseRepo::create(&pool, &verse("QS. Al-Insyirah: 5", false))
        .await
        .unwrap();

    let active = QuranVerseRepo::list(&pool, true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].reference, "QS. Al-Insyirah: 6");
    assert_eq!(QuranVerseRepo::list(&pool, false).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Financial reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn creating_a_report_replaces_earlier_ones(pool: PgPool) {
    FinancialReportRepo::replace_with(&pool, &report(100.0, 50.0, 20.0))
        .await
        .unwrap();
    let latest = FinancialReportRepo::replace_with(&pool, &report(130.0, 70.0, 100.0))
        .await
        .unwrap();

    assert_eq!(latest.current_balance, 100.0);

    let reports = FinancialReportRepo::list(&pool).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, latest.id);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn settings_are_absent_until_saved_then_merged(pool: PgPool) {
    assert!(SettingsRepo::get(&pool).await.unwrap().is_none());

    let store = PgSettingsStore::new(pool.clone());
    store
        .put(UpdateSettings {
            mosque_name: Some("Masjid Jami".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let saved = store
        .put(UpdateSettings {
            timezone: Some("Asia/Jakarta".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(saved.mosque_name, "Masjid Jami");
    assert_eq!(saved.timezone, "Asia/Jakarta");
    assert!(saved.updated_at.is_some());

    let reread = store.get().await.unwrap().unwrap();
    assert_eq!(reread.mosque_name, "Masjid Jami");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn overlapping_settings_updates_keep_both_fields(pool: PgPool) {
    let store = PgSettingsStore::new(pool.clone());

    let (name, timezone) = tokio::join!(
        store.put(UpdateSettings {
            mosque_name: Some("Masjid Jami".into()),
            ..Default::default()
        }),
        store.put(UpdateSettings {
            timezone: Some("Asia/Jakarta".into()),
            ..Default::default()
        }),
    );
    name.unwrap();
    timezone.unwrap();

    let stored = SettingsRepo::get(&pool).await.unwrap().unwrap();
    assert_eq!(stored.mosque_name, "Masjid Jami");
    assert_eq!(stored.timezone, "Asia/Jakarta");
}
