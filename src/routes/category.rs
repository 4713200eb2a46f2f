//! Route handlers for categories.
//!
//! Categories are shared across users, but the transactions listed under a
//! category are always scoped to the signed-in user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    auth::Claims,
    models::{Category, DatabaseID, Transaction},
    state::AppState,
    stores::{BudgetStore, CategoryStore, ReportStore, TransactionStore, UserStore},
    Error,
};

/// The data a client sends to create a category.
#[derive(Deserialize)]
pub struct NewCategory {
    /// The category name. Must be unique and non-empty.
    pub name: String,
}

/// Handler for creating a category.
pub async fn create_category<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    _claims: Claims,
    Json(data): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let category = state.category_store.create(&data.name)?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler for listing all categories.
pub async fn get_categories<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    _claims: Claims,
) -> Result<Json<Vec<Category>>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let categories = state.category_store.get_all()?;

    Ok(Json(categories))
}

/// Handler for listing the signed-in user's active transactions in a
/// category.
pub async fn get_category_transactions<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    // 404 for a category that does not exist, rather than an empty list.
    state.category_store.get(id)?;

    let transactions = state.transaction_store.get_by_category(claims.user_id, id)?;

    Ok(Json(transactions))
}
