//! Route handlers for creating, querying and managing transactions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    auth::Claims,
    models::{DatabaseID, NewTransaction, Transaction, TransactionKind, TransactionUpdate},
    state::AppState,
    stores::{
        BudgetStore, CategoryStore, ReportStore, TransactionFilter, TransactionStore, UserStore,
    },
    Error,
};

/// The supported query string filters for listing transactions.
///
/// The date filter only applies when both bounds are present.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    /// The earliest transaction date to include.
    pub start_date: Option<NaiveDate>,
    /// The latest transaction date to include.
    pub end_date: Option<NaiveDate>,
    /// Only include transactions in this category.
    pub category_id: Option<DatabaseID>,
    /// Only include transactions of this kind.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
}

impl From<TransactionQuery> for TransactionFilter {
    fn from(query: TransactionQuery) -> Self {
        let date_range = match (query.start_date, query.end_date) {
            (Some(start), Some(end)) => Some(start..=end),
            _ => None,
        };

        Self {
            date_range,
            category_id: query.category_id,
            kind: query.kind,
        }
    }
}

/// Handler for creating a transaction owned by the signed-in user.
pub async fn create_transaction<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let transaction = state
        .transaction_store
        .create(claims.user_id, new_transaction)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Handler for listing the signed-in user's active transactions, optionally
/// filtered by date range, category and kind.
pub async fn get_transactions<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let transactions = state
        .transaction_store
        .get_query(claims.user_id, query.into())?;

    Ok(Json(transactions))
}

/// Handler for fetching one of the signed-in user's transactions.
pub async fn get_transaction<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<Json<Transaction>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let transaction = state.transaction_store.get(claims.user_id, id)?;

    Ok(Json(transaction))
}

/// Handler for replacing the mutable fields of a transaction.
///
/// This is a full replace. An absent note or category clears the stored
/// value.
pub async fn update_transaction<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(data): Json<TransactionUpdate>,
) -> Result<Json<Transaction>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let transaction = state.transaction_store.update(claims.user_id, id, data)?;

    Ok(Json(transaction))
}

/// The data for assigning a transaction to a category.
#[derive(Deserialize)]
pub struct CategoryAssignment {
    /// The ID of the category to assign.
    pub category_id: DatabaseID,
}

/// Handler for assigning one of the signed-in user's transactions to a
/// category.
pub async fn set_transaction_category<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
    Json(data): Json<CategoryAssignment>,
) -> Result<Json<Transaction>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let transaction = state
        .transaction_store
        .set_category(claims.user_id, id, data.category_id)?;

    Ok(Json(transaction))
}

/// Handler for soft-deleting one of the signed-in user's transactions.
pub async fn delete_transaction<B, C, R, T, U>(
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
    let deleted_at = state.transaction_store.soft_delete(claims.user_id, id)?;

    Ok(Json(json!({ "deleted_at": deleted_at })))
}

/// Handler for restoring a soft-deleted transaction.
pub async fn restore_transaction<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
    Path(id): Path<DatabaseID>,
) -> Result<Json<Transaction>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    state.transaction_store.restore(claims.user_id, id)?;

    let transaction = state.transaction_store.get(claims.user_id, id)?;

    Ok(Json(transaction))
}
