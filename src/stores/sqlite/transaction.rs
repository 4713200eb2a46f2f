//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rusqlite::{params_from_iter, types::Value, Connection, Row};

use crate::{
    db::{CreateTable, MapRow},
    models::{
        Category, DatabaseID, NewTransaction, Transaction, TransactionUpdate, UserID,
    },
    stores::{
        sqlite::{restore_row, soft_delete_row},
        TransactionFilter, TransactionStore,
    },
    Error,
};

/// Stores transactions in a SQLite database.
///
/// Every row returned by this store is joined with its category, so that
/// an uncategorized transaction (or one whose category no longer resolves)
/// comes back with `category: None` rather than an error.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const SELECT_TRANSACTION: &str = "SELECT t.id, t.kind, t.amount, t.currency, t.exchange_rate, \
     t.note, t.category_id, t.user_id, t.created_at, t.updated_at, t.deleted_at, c.id, c.name \
     FROM \"transaction\" t LEFT JOIN category c ON c.id = t.category_id";

impl TransactionStore for SqliteTransactionStore {
    fn create(&mut self, user_id: UserID, data: NewTransaction) -> Result<Transaction, Error> {
        if data.amount < 0.0 {
            return Err(Error::Validation("amount must be non-negative".to_owned()));
        }

        let now = Utc::now();

        let id: DatabaseID = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO \"transaction\"
                 (kind, amount, currency, exchange_rate, note, category_id, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 RETURNING id",
            )?
            .query_row(
                (
                    data.kind,
                    data.amount,
                    data.currency,
                    data.exchange_rate,
                    data.note,
                    data.category_id,
                    user_id,
                    now,
                    now,
                ),
                |row| row.get(0),
            )?;

        self.get(user_id, id)
    }

    fn get(&self, user_id: UserID, id: DatabaseID) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "{SELECT_TRANSACTION} WHERE t.id = :id AND t.user_id = :user_id AND t.deleted_at IS NULL"
            ))?
            .query_row(&[(":id", &id), (":user_id", &user_id)], Self::map_row)?;

        Ok(transaction)
    }

    fn get_query(
        &self,
        user_id: UserID,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>, Error> {
        let mut where_clause_parts =
            vec!["t.user_id = ?1 AND t.deleted_at IS NULL".to_string()];
        let mut query_parameters = vec![Value::Integer(user_id)];

        if let Some(date_range) = filter.date_range {
            where_clause_parts.push(format!(
                "date(t.created_at) BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Text(date_range.start().to_string()));
            query_parameters.push(Value::Text(date_range.end().to_string()));
        }

        if let Some(category_id) = filter.category_id {
            where_clause_parts.push(format!("t.category_id = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Integer(category_id));
        }

        if let Some(kind) = filter.kind {
            where_clause_parts.push(format!("t.kind = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(kind.as_str().to_owned()));
        }

        let query_string = format!(
            "{SELECT_TRANSACTION} WHERE {}",
            where_clause_parts.join(" AND ")
        );

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    fn get_by_category(
        &self,
        user_id: UserID,
        category_id: DatabaseID,
    ) -> Result<Vec<Transaction>, Error> {
        self.get_query(
            user_id,
            TransactionFilter {
                category_id: Some(category_id),
                ..Default::default()
            },
        )
    }

    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        data: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        if data.amount < 0.0 {
            return Err(Error::Validation("amount must be non-negative".to_owned()));
        }

        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE \"transaction\"
             SET kind = ?1, amount = ?2, note = ?3, category_id = ?4, updated_at = ?5
             WHERE id = ?6 AND user_id = ?7 AND deleted_at IS NULL",
            (
                data.kind,
                data.amount,
                data.note,
                data.category_id,
                Utc::now(),
                id,
                user_id,
            ),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        self.get(user_id, id)
    }

    fn set_category(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        category_id: DatabaseID,
    ) -> Result<Transaction, Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE \"transaction\" SET category_id = ?1, updated_at = ?2
             WHERE id = ?3 AND user_id = ?4 AND deleted_at IS NULL",
            (category_id, Utc::now(), id, user_id),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        self.get(user_id, id)
    }

    fn soft_delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<DateTime<Utc>, Error> {
        soft_delete_row(&self.connection.lock().unwrap(), "transaction", id, user_id)
    }

    fn restore(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error> {
        restore_row(&self.connection.lock().unwrap(), "transaction", id, user_id)
    }
}

impl CreateTable for SqliteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                currency TEXT NOT NULL,
                exchange_rate REAL NOT NULL,
                note TEXT,
                category_id INTEGER,
                user_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let category = match row.get::<_, Option<DatabaseID>>(offset + 11)? {
            Some(id) => Some(Category {
                id,
                name: row.get(offset + 12)?,
            }),
            None => None,
        };

        Ok(Transaction {
            id: row.get(offset)?,
            kind: row.get(offset + 1)?,
            amount: row.get(offset + 2)?,
            currency: row.get(offset + 3)?,
            exchange_rate: row.get(offset + 4)?,
            note: row.get(offset + 5)?,
            category_id: row.get(offset + 6)?,
            category,
            user_id: row.get(offset + 7)?,
            created_at: row.get(offset + 8)?,
            updated_at: row.get(offset + 9)?,
            deleted_at: row.get(offset + 10)?,
        })
    }
}
