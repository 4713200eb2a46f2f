//! Route handlers and router configuration for the REST API.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    auth,
    state::AppState,
    stores::{BudgetStore, CategoryStore, ReportStore, TransactionStore, UserStore},
};

pub mod budget;
pub mod category;
pub mod endpoints;
pub mod report;
pub mod transaction;
pub mod user;

/// Return a router with all the API's routes.
///
/// `/register` and `/login` are open. Every other route requires a bearer
/// token, enforced by the [Claims](crate::auth::Claims) extractor in each
/// handler rather than by middleware.
pub fn build_router<B, C, R, T, U>(state: AppState<B, C, R, T, U>) -> Router
where
    B: BudgetStore + Clone + Send + Sync + 'static,
    C: CategoryStore + Clone + Send + Sync + 'static,
    R: ReportStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::REGISTER, post(user::register))
        .route(endpoints::LOG_IN, post(auth::log_in))
        .route(endpoints::ME, get(user::get_me))
        .route(
            endpoints::TRANSACTIONS,
            get(transaction::get_transactions).post(transaction::create_transaction),
        )
        .route(
            endpoints::TRANSACTION,
            get(transaction::get_transaction).put(transaction::update_transaction),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            put(transaction::delete_transaction),
        )
        .route(
            endpoints::RESTORE_TRANSACTION,
            put(transaction::restore_transaction),
        )
        .route(
            endpoints::TRANSACTION_CATEGORY,
            put(transaction::set_transaction_category),
        )
        .route(
            endpoints::CATEGORIES,
            get(category::get_categories).post(category::create_category),
        )
        .route(
            endpoints::CATEGORY_TRANSACTIONS,
            get(category::get_category_transactions),
        )
        .route(
            endpoints::BUDGETS,
            get(budget::get_budgets).post(budget::create_budget),
        )
        .route(
            endpoints::BUDGET,
            get(budget::get_budget).put(budget::update_budget),
        )
        .route(endpoints::DELETE_BUDGET, put(budget::delete_budget))
        .route(endpoints::RESTORE_BUDGET, put(budget::restore_budget))
        .route(endpoints::SUMMARY, get(report::get_summary))
        .route(endpoints::SUMMARY_TREND, get(report::get_trend))
        .with_state(state)
}
