//! Route handlers for the income and expense reports.

use axum::{extract::State, Json};

use crate::{
    auth::Claims,
    models::{Summary, TrendPoint},
    state::AppState,
    stores::{BudgetStore, CategoryStore, ReportStore, TransactionStore, UserStore},
    Error,
};

/// Handler for the signed-in user's all-time income and expense totals.
pub async fn get_summary<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
) -> Result<Json<Summary>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let summary = state.report_store.summary(claims.user_id)?;

    Ok(Json(summary))
}

/// Handler for the signed-in user's per-month income and expense totals,
/// in ascending month order.
pub async fn get_trend<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
) -> Result<Json<Vec<TrendPoint>>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let trend = state.report_store.trend(claims.user_id)?;

    Ok(Json(trend))
}
