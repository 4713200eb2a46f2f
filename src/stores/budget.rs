//! Defines the budget store trait.

use chrono::{DateTime, Utc};

use crate::{
    models::{Budget, BudgetUpdate, DatabaseID, NewBudget, UserID},
    Error,
};

/// Handles the creation, retrieval and lifecycle of budgets.
///
/// Every budget returned by this trait has its `spent` field populated from
/// the live transaction data: the sum of the owner's active expense
/// transactions in the budget's category.
pub trait BudgetStore {
    /// Create a new budget owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the amount is negative or the month
    /// label is not in `YYYY-MM` format.
    fn create(&mut self, user_id: UserID, data: NewBudget) -> Result<Budget, Error>;

    /// Retrieve an active budget owned by `user_id` by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no such active budget exists.
    fn get(&self, user_id: UserID, id: DatabaseID) -> Result<Budget, Error>;

    /// Retrieve all active budgets owned by `user_id`, in storage order.
    fn get_all(&self, user_id: UserID) -> Result<Vec<Budget>, Error>;

    /// Update the allocated amount of an active budget. No other field can
    /// be changed after creation.
    ///
    /// # Errors
    /// Returns [Error::NotFound] under the same rule as [BudgetStore::get],
    /// or [Error::Validation] if the new amount is negative.
    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        data: BudgetUpdate,
    ) -> Result<Budget, Error>;

    /// Mark an active budget as deleted and return the deletion timestamp.
    /// The row is retained.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the budget is absent, foreign or
    /// already deleted.
    fn soft_delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<DateTime<Utc>, Error>;

    /// Clear the deletion timestamp of a budget, active or deleted.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the budget is absent or foreign.
    fn restore(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error>;
}
