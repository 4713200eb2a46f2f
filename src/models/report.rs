//! Defines the aggregate report types returned by the summary and trend
//! endpoints.

use serde::{Deserialize, Serialize};

/// A user's overall financial position.
///
/// All fields are zero, not null, when the user has no transactions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The sum of all active income transactions.
    pub total_income: f64,
    /// The sum of all active expense transactions.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
}

/// One month's income and expense totals in a trend series.
///
/// Only months with at least one active transaction appear in a trend;
/// empty months are not synthesized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// The month label in `YYYY-MM` format.
    pub month: String,
    /// The sum of active income transactions created in this month.
    pub total_income: f64,
    /// The sum of active expense transactions created in this month.
    pub total_expense: f64,
}
