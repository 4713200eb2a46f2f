//! The API endpoint URIs.
//!
//! For endpoints that take an `{id}` parameter, use [format_endpoint].

/// The route for creating a user account.
pub const REGISTER: &str = "/register";
/// The route for exchanging credentials for a bearer token.
pub const LOG_IN: &str = "/login";
/// The route for fetching the signed-in user.
pub const ME: &str = "/me";

/// The route for listing and creating transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for fetching or replacing a single transaction.
pub const TRANSACTION: &str = "/transactions/{id}";
/// The route for soft-deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/transactions/delete/{id}";
/// The route for restoring a soft-deleted transaction.
pub const RESTORE_TRANSACTION: &str = "/transactions/restore/{id}";
/// The route for assigning a transaction to a category.
pub const TRANSACTION_CATEGORY: &str = "/transactions/{id}/category";

/// The route for listing and creating categories.
pub const CATEGORIES: &str = "/categories";
/// The route for listing the caller's transactions in a category.
pub const CATEGORY_TRANSACTIONS: &str = "/categories/{id}/transactions";

/// The route for listing and creating budgets.
pub const BUDGETS: &str = "/budgets";
/// The route for fetching or updating a single budget.
pub const BUDGET: &str = "/budgets/{id}";
/// The route for soft-deleting a budget.
pub const DELETE_BUDGET: &str = "/budgets/delete/{id}";
/// The route for restoring a soft-deleted budget.
pub const RESTORE_BUDGET: &str = "/budgets/restore/{id}";

/// The route for the all-time income and expense totals.
pub const SUMMARY: &str = "/summary";
/// The route for the per-month income and expense series.
pub const SUMMARY_TREND: &str = "/summary/trend";

/// Format an endpoint that takes an `{id}` path parameter.
pub fn format_endpoint(endpoint: &str, id: i64) -> String {
    endpoint.replace("{id}", &id.to_string())
}
