//! Weekly treasury report shown on the display.

use masjid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `financial_reports` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FinancialReport {
    pub id: DbId,
    pub previous_balance: f64,
    pub weekly_income: f64,
    pub expenses: f64,
    /// `previous_balance + weekly_income - expenses`, computed on insert.
    pub current_balance: f64,
    pub period: String,
    pub created_at: Timestamp,
}

/// DTO for creating a report. The current balance is never accepted from
/// the client.
#[derive(Debug, Deserialize)]
pub struct CreateFinancialReport {
    pub previous_balance: f64,
    pub weekly_income: f64,
    pub expenses: f64,
    #[serde(default)]
    pub period: String,
}

impl CreateFinancialReport {
    pub fn current_balance(&self) -> f64 {
        self.previous_balance + self.weekly_income - self.expenses
    }
}
