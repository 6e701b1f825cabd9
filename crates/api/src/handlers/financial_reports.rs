//! Handlers for the weekly treasury report.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use masjid_core::error::CoreError;
use masjid_core::types::DbId;
use masjid_db::models::financial_report::CreateFinancialReport;
use masjid_db::repositories::FinancialReportRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::passphrase::RequirePassphrase;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/financial-reports
///
/// Newest first. In practice at most one report exists.
pub async fn list_financial_reports(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let reports = FinancialReportRepo::list(&state.pool).await?;
    Ok(Json(reports))
}

/// POST /api/financial-reports
///
/// Computes the current balance and replaces any earlier report.
pub async fn create_financial_report(
    _: RequirePassphrase,
    State(state): State<AppState>,
    Json(input): Json<CreateFinancialReport>,
) -> AppResult<impl IntoResponse> {
    let report = FinancialReportRepo::replace_with(&state.pool, &input).await?;

    tracing::info!(
        report_id = report.id,
        current_balance = report.current_balance,
        period = %report.period,
        "Financial report published",
    );

    Ok((StatusCode::CREATED, Json(report)))
}

/// DELETE /api/financial-reports/{id}
pub async fn delete_financial_report(
    _: RequirePassphrase,
    State(state): State<AppState>,
    Path(report_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !FinancialReportRepo::delete(&state.pool, report_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "FinancialReport",
            id: report_id,
        }));
    }

    tracing::info!(report_id, "Financial report deleted");
    Ok(Json(SuccessResponse::ok()))
}
