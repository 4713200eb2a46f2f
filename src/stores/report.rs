//! Defines the report store trait for the summary and trend aggregates.

use crate::{
    models::{Summary, TrendPoint, UserID},
    Error,
};

/// Computes financial aggregates over a user's active transactions.
///
/// Both operations treat the absence of matching transactions as the zero
/// value, never as an error.
pub trait ReportStore {
    /// Compute the total income, total expense and balance for `user_id`.
    ///
    /// All totals are zero when the user has no active transactions.
    fn summary(&self, user_id: UserID) -> Result<Summary, Error>;

    /// Compute the month-bucketed income/expense series for `user_id`,
    /// sorted ascending by month label.
    ///
    /// Only months with at least one active transaction appear; a user
    /// with no transactions gets an empty series.
    fn trend(&self, user_id: UserID) -> Result<Vec<TrendPoint>, Error>;
}
