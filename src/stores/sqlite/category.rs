//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    db::{CreateTable, MapRow},
    models::{Category, DatabaseID},
    stores::CategoryStore,
    Error,
};

/// Stores categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCategoryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SqliteCategoryStore {
    fn create(&mut self, name: &str) -> Result<Category, Error> {
        if name.is_empty() {
            return Err(Error::Validation(
                "category name cannot be empty".to_owned(),
            ));
        }

        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare("INSERT INTO category (name) VALUES (?1) RETURNING id, name")?
            .query_row((name,), Self::map_row)?;

        Ok(category)
    }

    fn get(&self, id: DatabaseID) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name FROM category WHERE id = :id")?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(category)
    }

    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare("SELECT id, name FROM category")?
            .query_map([], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SqliteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok(Category {
            id: row.get(offset)?,
            name: row.get(offset + 1)?,
        })
    }
}

#[cfg(test)]
mod sqlite_category_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{db::initialize, stores::CategoryStore, Error};

    use super::SqliteCategoryStore;

    fn get_test_store() -> SqliteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database.");

        SqliteCategoryStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_then_get() {
        let mut store = get_test_store();

        let category = store.create("Food").expect("Could not create category");

        assert_eq!(store.get(category.id), Ok(category));
    }

    #[test]
    fn create_fails_on_empty_name() {
        let mut store = get_test_store();

        let result = store.create("");

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn create_fails_on_duplicate_name() {
        let mut store = get_test_store();
        store.create("Food").unwrap();

        let duplicate = store.create("Food");

        assert_eq!(duplicate, Err(Error::DuplicateCategory));
    }

    #[test]
    fn get_all_returns_every_category() {
        let mut store = get_test_store();
        let want = vec![
            store.create("Food").unwrap(),
            store.create("Transport").unwrap(),
            store.create("Entertainment").unwrap(),
        ];

        let got = store.get_all().expect("Could not get categories");

        assert_eq!(got, want);
    }
}
