//! This module defines the store traits that make up the storage seam of
//! the application, and their SQLite implementations.
//!
//! Handlers only ever talk to these traits; the concrete backend is
//! injected into [AppState](crate::AppState) at construction.

pub use budget::BudgetStore;
pub use category::CategoryStore;
pub use report::ReportStore;
pub use transaction::{TransactionFilter, TransactionStore};
pub use user::UserStore;

mod budget;
mod category;
mod report;
pub mod sqlite;
mod transaction;
mod user;
