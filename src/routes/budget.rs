//! Route handlers for budgets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    auth::Claims,
    models::{Budget, BudgetUpdate, DatabaseID, NewBudget},
    state::AppState,
    stores::{BudgetStore, CategoryStore, ReportStore, TransactionStore, UserStore},
    Error,
};

/// Handler for creating a budget owned by the signed-in user.
pub async fn create_budget<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Json(new_budget): Json<NewBudget>,
) -> Result<(StatusCode, Json<Budget>), Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let budget = state.budget_store.create(claims.user_id, new_budget)?;

    Ok((StatusCode::CREATED, Json(budget)))
}

/// Handler for listing the signed-in user's active budgets.
pub async fn get_budgets<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
) -> Result<Json<Vec<Budget>>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let budgets = state.budget_store.get_all(claims.user_id)?;

    Ok(Json(budgets))
}

/// Handler for fetching one of the signed-in user's budgets.
pub async fn get_budget<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<Json<Budget>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let budget = state.budget_store.get(claims.user_id, id)?;

    Ok(Json(budget))
}

/// Handler for changing a budget's allocated amount.
pub async fn update_budget<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(data): Json<BudgetUpdate>,
) -> Result<Json<Budget>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let budget = state.budget_store.update(claims.user_id, id, data)?;

    Ok(Json(budget))
}

/// Handler for soft-deleting one of the signed-in user's budgets.
pub async fn delete_budget<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<Json<Value>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let deleted_at = state.budget_store.soft_delete(claims.user_id, id)?;

    Ok(Json(json!({ "deleted_at": deleted_at })))
}

/// Handler for restoring a soft-deleted budget.
pub async fn restore_budget<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<Json<Budget>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    state.budget_store.restore(claims.user_id, id)?;

    let budget = state.budget_store.get(claims.user_id, id)?;

    Ok(Json(budget))
}
