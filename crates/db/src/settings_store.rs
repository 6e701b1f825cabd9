//! Settings access behind a trait, so the HTTP layer can run against
//! PostgreSQL in production and an in-memory document in tests.

use async_trait::async_trait;
use chrono::Utc;
use masjid_core::settings::{MosqueSettings, UpdateSettings};
use tokio::sync::RwLock;

use crate::repositories::SettingsRepo;
use crate::DbPool;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The stored settings, or `None` when nothing has been saved yet.
    async fn get(&self) -> Result<Option<MosqueSettings>, sqlx::Error>;

    /// Merge `update` into the stored document (or the defaults, when none
    /// is stored) and persist the result.
    async fn put(&self, update: UpdateSettings) -> Result<MosqueSettings, sqlx::Error>;

    /// Stored settings or defaults.
    async fn get_or_default(&self) -> Result<MosqueSettings, sqlx::Error> {
        Ok(self.get().await?.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

pub struct PgSettingsStore {
    pool: DbPool,
}

impl PgSettingsStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self) -> Result<Option<MosqueSettings>, sqlx::Error> {
        SettingsRepo::get(&self.pool).await
    }

    async fn put(&self, update: UpdateSettings) -> Result<MosqueSettings, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Row lock held until commit; overlapping updates merge in turn.
        let mut settings = SettingsRepo::lock(&mut tx).await?.unwrap_or_default();
        settings.apply(update);
        let saved = SettingsRepo::upsert(&mut *tx, &settings).await?;

        tx.commit().await?;
        Ok(saved)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local store. Starts empty unless seeded.
#[derive(Default)]
pub struct MemorySettingsStore {
    document: RwLock<Option<MosqueSettings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(settings: MosqueSettings) -> Self {
        Self {
            document: RwLock::new(Some(settings)),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self) -> Result<Option<MosqueSettings>, sqlx::Error> {
        Ok(self.document.read().await.clone())
    }

    async fn put(&self, update: UpdateSettings) -> Result<MosqueSettings, sqlx::Error> {
        let mut document = self.document.write().await;
        let mut settings = document.clone().unwrap_or_default();
        settings.apply(update);
        settings.updated_at = Some(Utc::now());
        *document = Some(settings.clone());
        Ok(settings)
    }
}
