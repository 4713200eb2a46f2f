//! This module defines the domain data types.

pub use budget::{Budget, BudgetUpdate, NewBudget};
pub use category::Category;
pub use report::{Summary, TrendPoint};
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionUpdate};
pub use user::User;

mod budget;
mod category;
mod report;
mod transaction;
mod user;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;

/// Alias for the integer type used to identify users.
pub type UserID = i64;
