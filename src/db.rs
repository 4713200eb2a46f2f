/*! This module defines the traits for mapping the domain models to the
application's database and the function that sets up the schema. */

use rusqlite::{Connection, Row, Transaction as SqlTransaction};

use crate::{
    stores::sqlite::{
        SqliteBudgetStore, SqliteCategoryStore, SqliteTransactionStore, SqliteUserStore,
    },
    Error,
};

/// A trait for adding an object's schema to the database.
pub trait CreateTable {
    /// Create the table(s) for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` to a concrete Rust type.
///
/// The offset variant allows mapping types out of joined rows, e.g. a
/// transaction row with its category appended after the transaction columns.
pub trait MapRow {
    /// The type that the row is mapped to.
    type ReturnType;

    /// Map `row` to the return type, starting from the first column.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Map `row` to the return type, starting from the column at `offset`.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for all domain models in a single exclusive
/// transaction.
///
/// # Errors
/// Returns an error if any table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    SqliteUserStore::create_table(&transaction)?;
    SqliteCategoryStore::create_table(&transaction)?;
    SqliteTransactionStore::create_table(&transaction)?;
    SqliteBudgetStore::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
