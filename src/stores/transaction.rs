//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    models::{DatabaseID, NewTransaction, Transaction, TransactionKind, TransactionUpdate, UserID},
    Error,
};

/// Handles the creation, retrieval and lifecycle of transactions.
///
/// Every operation is scoped to the owning user: a lookup for a row owned
/// by another user behaves exactly like a lookup for a row that does not
/// exist.
pub trait TransactionStore {
    /// Create a new transaction owned by `user_id`.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the amount is negative.
    fn create(&mut self, user_id: UserID, data: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve an active transaction owned by `user_id` by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no such active transaction exists.
    fn get(&self, user_id: UserID, id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve the active transactions owned by `user_id` that match
    /// `filter`, in storage order.
    fn get_query(&self, user_id: UserID, filter: TransactionFilter)
        -> Result<Vec<Transaction>, Error>;

    /// Retrieve the active transactions owned by `user_id` in the category
    /// `category_id`.
    fn get_by_category(
        &self,
        user_id: UserID,
        category_id: DatabaseID,
    ) -> Result<Vec<Transaction>, Error>;

    /// Replace the kind, amount, note and category of an active transaction.
    ///
    /// This is a full replacement: a `None` note or category clears the
    /// stored value.
    ///
    /// # Errors
    /// Returns [Error::NotFound] under the same rule as [TransactionStore::get],
    /// or [Error::Validation] if the new amount is negative.
    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        data: TransactionUpdate,
    ) -> Result<Transaction, Error>;

    /// Re-point an active transaction at the category `category_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] under the same rule as [TransactionStore::get].
    fn set_category(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        category_id: DatabaseID,
    ) -> Result<Transaction, Error>;

    /// Mark an active transaction as deleted and return the deletion
    /// timestamp. The row is retained.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction is absent, foreign or
    /// already deleted.
    fn soft_delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<DateTime<Utc>, Error>;

    /// Clear the deletion timestamp of a transaction, active or deleted.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction is absent or foreign.
    fn restore(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error>;
}

/// Defines which transactions should be fetched from
/// [TransactionStore::get_query].
///
/// The default filter matches all of a user's active transactions.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    /// Include transactions created within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<NaiveDate>>,
    /// Include only transactions in the category with this ID.
    pub category_id: Option<DatabaseID>,
    /// Include only transactions of this kind.
    pub kind: Option<TransactionKind>,
}
