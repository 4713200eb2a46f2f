//! SQLite implementations of the store traits, plus a convenience type
//! alias and constructor for an [AppState](crate::AppState) backed by
//! SQLite.

pub use budget::SqliteBudgetStore;
pub use category::SqliteCategoryStore;
pub use report::SqliteReportStore;
pub use transaction::SqliteTransactionStore;
pub use user::SqliteUserStore;

mod budget;
mod category;
mod report;
mod transaction;
mod user;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::{
    db::initialize,
    models::{DatabaseID, UserID},
    AppState, Error,
};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SqlAppState = AppState<
    SqliteBudgetStore,
    SqliteCategoryStore,
    SqliteReportStore,
    SqliteTransactionStore,
    SqliteUserStore,
>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the
/// domain models.
pub fn create_app_state(db_connection: Connection, jwt_secret: &str) -> Result<SqlAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        jwt_secret,
        SqliteBudgetStore::new(connection.clone()),
        SqliteCategoryStore::new(connection.clone()),
        SqliteReportStore::new(connection.clone()),
        SqliteTransactionStore::new(connection.clone()),
        SqliteUserStore::new(connection),
    ))
}

/// Mark the row of `table` matching `id` and `user_id` as deleted by
/// setting its deletion timestamp, and return the timestamp.
///
/// The guarded `UPDATE` only considers active rows, so deleted and foreign
/// rows both surface as [Error::NotFound] and their existence never leaks.
pub(crate) fn soft_delete_row(
    connection: &Connection,
    table: &str,
    id: DatabaseID,
    user_id: UserID,
) -> Result<DateTime<Utc>, Error> {
    let deleted_at = Utc::now();

    let rows_affected = connection.execute(
        &format!(
            "UPDATE \"{table}\" SET deleted_at = ?1
             WHERE id = ?2 AND user_id = ?3 AND deleted_at IS NULL"
        ),
        (deleted_at, id, user_id),
    )?;

    if rows_affected == 0 {
        Err(Error::NotFound)
    } else {
        Ok(deleted_at)
    }
}

/// Clear the deletion timestamp of the row of `table` matching `id` and
/// `user_id`, whether it is active or deleted.
///
/// Restoring an active row is a no-op that still succeeds.
pub(crate) fn restore_row(
    connection: &Connection,
    table: &str,
    id: DatabaseID,
    user_id: UserID,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        &format!("UPDATE \"{table}\" SET deleted_at = NULL WHERE id = ?1 AND user_id = ?2"),
        (id, user_id),
    )?;

    if rows_affected == 0 {
        Err(Error::NotFound)
    } else {
        Ok(())
    }
}
