//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use email_address::EmailAddress;
use rusqlite::{Connection, Row};

use crate::{
    db::{CreateTable, MapRow},
    models::{User, UserID},
    stores::UserStore,
    Error,
};

/// Stores users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const USER_COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at, deleted_at";

impl UserStore for SqliteUserStore {
    fn create(
        &mut self,
        name: &str,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<User, Error> {
        let now = Utc::now();

        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO user (name, email, password_hash, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {USER_COLUMNS}"
            ))?
            .query_row(
                (name, email.as_str(), password_hash, now, now),
                Self::map_row,
            )?;

        Ok(user)
    }

    fn get(&self, id: UserID) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!("SELECT {USER_COLUMNS} FROM user WHERE id = :id"))?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(user)
    }

    fn get_by_email(&self, email: &str) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {USER_COLUMNS} FROM user WHERE email = :email"
            ))?
            .query_row(&[(":email", &email)], Self::map_row)?;

        Ok(user)
    }
}

impl CreateTable for SqliteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(User {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
            email: row.get(offset + 2)?,
            password_hash: row.get(offset + 3)?,
            created_at: row.get(offset + 4)?,
            updated_at: row.get(offset + 5)?,
            deleted_at: row.get(offset + 6)?,
        })
    }
}

#[cfg(test)]
mod sqlite_user_store_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{db::initialize, stores::UserStore, Error};

    use super::SqliteUserStore;

    fn get_test_store() -> SqliteUserStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database.");

        SqliteUserStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_then_get_by_email() {
        let mut store = get_test_store();
        let email = EmailAddress::from_str("test@test.com").unwrap();

        let created = store
            .create("Test User", &email, "hashhashhash")
            .expect("Could not create user");

        let selected = store.get_by_email("test@test.com").unwrap();

        assert_eq!(created, selected);
        assert_eq!(selected.name, "Test User");
        assert_eq!(selected.password_hash, "hashhashhash");
    }

    #[test]
    fn create_fails_on_duplicate_email() {
        let mut store = get_test_store();
        let email = EmailAddress::from_str("test@test.com").unwrap();
        store.create("First", &email, "hash1").unwrap();

        let duplicate = store.create("Second", &email, "hash2");

        assert_eq!(duplicate, Err(Error::DuplicateEmail));
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let store = get_test_store();

        assert_eq!(store.get(999), Err(Error::NotFound));
    }
}
