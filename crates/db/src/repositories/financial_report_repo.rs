//! Repository for the `financial_reports` table.
//!
//! The display only ever shows the latest report, so creating a report
//! replaces every earlier one.

use masjid_core::types::DbId;
use sqlx::PgPool;

use crate::models::financial_report::{CreateFinancialReport, FinancialReport};

const COLUMNS: &str =
    "id, previous_balance, weekly_income, expenses, current_balance, period, created_at";

pub struct FinancialReportRepo;

impl FinancialReportRepo {
    /// List reports, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<FinancialReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM financial_reports ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, FinancialReport>(&query)
            .fetch_all(pool)
            .await
    }

    /// Replace all reports with a new one, computing its current balance.
    pub async fn replace_with(
        pool: &PgPool,
        input: &CreateFinancialReport,
    ) -> Result<FinancialReport, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM financial_reports")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let query = format!(
            "INSERT INTO financial_reports
                (previous_balance, weekly_income, expenses, current_balance, period)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, FinancialReport>(&query)
            .bind(input.previous_balance)
            .bind(input.weekly_income)
            .bind(input.expenses)
            .bind(input.current_balance())
            .bind(&input.period)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(report_id = report.id, removed, "Replaced financial reports");
        Ok(report)
    }

    /// Delete a report by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM financial_reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
