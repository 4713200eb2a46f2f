//! Defines the `Category` type.
//! A category labels transactions and budgets; it is global, not owned by a user.

use serde::{Deserialize, Serialize};

use crate::models::DatabaseID;

/// A label for grouping transactions and budgets, e.g. "Food" or "Transport".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// The category's database ID.
    pub id: DatabaseID,
    /// The category's name, unique across all categories.
    pub name: String,
}
