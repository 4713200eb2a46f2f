//! Defines the `Budget` type and the input types for creating and updating
//! budgets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Category, DatabaseID, UserID};

/// A monthly spending allocation for a category.
///
/// `spent` is derived from the live transaction data on every read and is
/// never persisted, so it cannot go stale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The budget's database ID.
    pub id: DatabaseID,
    /// The ID of the user that owns this budget.
    pub user_id: UserID,
    /// The ID of the category this budget allocates money for.
    pub category_id: DatabaseID,
    /// The category joined onto the budget, or `None` if the category no
    /// longer resolves.
    pub category: Option<Category>,
    /// The allocated amount.
    pub amount: f64,
    /// The currency code the amount was entered in.
    pub currency: String,
    /// The exchange rate to the base currency at entry time.
    pub exchange_rate: f64,
    /// The sum of the owner's active expense transactions in this budget's
    /// category. Computed at read time.
    pub spent: f64,
    /// The month this budget applies to, in `YYYY-MM` format.
    pub month: String,
    /// When the budget was created.
    pub created_at: DateTime<Utc>,
    /// When the budget was last modified.
    pub updated_at: DateTime<Utc>,
    /// When the budget was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "IDR".to_owned()
}

fn default_exchange_rate() -> f64 {
    1.0
}

/// The data required to create a budget.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewBudget {
    /// The ID of the category to allocate money for.
    pub category_id: DatabaseID,
    /// The allocated amount. Must be non-negative.
    pub amount: f64,
    /// The currency code the amount was entered in.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// The exchange rate to the base currency at entry time.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,
    /// The month this budget applies to, in `YYYY-MM` format.
    pub month: String,
}

/// The data for updating a budget. Only the allocated amount can change.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BudgetUpdate {
    /// The new allocated amount. Must be non-negative.
    pub amount: f64,
}
