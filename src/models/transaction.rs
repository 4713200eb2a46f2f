//! Defines the `Transaction` type and the input types for creating and
//! updating transactions.

use chrono::{DateTime, Utc};
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};
use serde::{Deserialize, Serialize};

use crate::models::{Category, DatabaseID, UserID};

/// Whether a transaction adds money to or removes money from a user's balance.
///
/// Keeping this a closed enum makes the sum-by-kind logic in the reports
/// exhaustive: there is no third value to silently mishandle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming in, e.g. a salary payment.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The string stored in the database and used in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Income" => Ok(TransactionKind::Income),
            "Expense" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("invalid transaction kind '{other}'").into(),
            )),
        }
    }
}

/// An income or expense recorded by a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The transaction's database ID.
    pub id: DatabaseID,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The transaction amount. Always non-negative; the sign is implied by `kind`.
    pub amount: f64,
    /// The currency code the amount was entered in.
    pub currency: String,
    /// The exchange rate to the base currency at entry time. Stored for
    /// display, never applied in aggregation.
    pub exchange_rate: f64,
    /// Free-form text describing the transaction.
    pub note: Option<String>,
    /// The ID of the category this transaction belongs to, if any.
    pub category_id: Option<DatabaseID>,
    /// The category joined onto the transaction, or `None` if the
    /// transaction is uncategorized or the category no longer resolves.
    pub category: Option<Category>,
    /// The ID of the user that owns this transaction.
    pub user_id: UserID,
    /// When the transaction was recorded.
    pub created_at: DateTime<Utc>,
    /// When the transaction was last modified.
    pub updated_at: DateTime<Utc>,
    /// When the transaction was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "IDR".to_owned()
}

fn default_exchange_rate() -> f64 {
    1.0
}

/// The data required to create a transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Whether the new transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The transaction amount. Must be non-negative.
    pub amount: f64,
    /// The currency code the amount was entered in.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// The exchange rate to the base currency at entry time.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,
    /// Free-form text describing the transaction.
    #[serde(default)]
    pub note: Option<String>,
    /// The ID of the category the transaction belongs to, if any.
    #[serde(default)]
    pub category_id: Option<DatabaseID>,
}

/// The data for a full update of a transaction.
///
/// Updates are full replacements: fields absent from the payload reset the
/// stored value, so an absent `category_id` clears the category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionUpdate {
    /// The new transaction kind.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The new amount. Must be non-negative.
    pub amount: f64,
    /// The new note, or `None` to clear it.
    #[serde(default)]
    pub note: Option<String>,
    /// The new category, or `None` to mark the transaction uncategorized.
    #[serde(default)]
    pub category_id: Option<DatabaseID>,
}
