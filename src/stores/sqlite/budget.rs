//! Implements a SQLite backed budget store.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, Row};

use crate::{
    db::{CreateTable, MapRow},
    models::{Budget, BudgetUpdate, Category, DatabaseID, NewBudget, UserID},
    stores::{
        sqlite::{restore_row, soft_delete_row},
        BudgetStore,
    },
    Error,
};

/// Stores budgets in a SQLite database.
///
/// The `spent` figure is computed in the select itself from the owner's
/// active expense transactions, so a budget read always reflects the
/// transactions as they are right now.
#[derive(Debug, Clone)]
pub struct SqliteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const SELECT_BUDGET: &str = "SELECT b.id, b.user_id, b.category_id, b.amount, b.currency, \
     b.exchange_rate, b.month, b.created_at, b.updated_at, b.deleted_at, c.id, c.name, \
     COALESCE((SELECT SUM(t.amount) FROM \"transaction\" t \
       WHERE t.user_id = b.user_id AND t.category_id = b.category_id \
       AND t.kind = 'Expense' AND t.deleted_at IS NULL), 0) \
     FROM budget b LEFT JOIN category c ON c.id = b.category_id";

fn validate_month(month: &str) -> Result<(), Error> {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d")
        .map_err(|_| Error::Validation("month must be in YYYY-MM format".to_owned()))?;

    Ok(())
}

impl BudgetStore for SqliteBudgetStore {
    fn create(&mut self, user_id: UserID, data: NewBudget) -> Result<Budget, Error> {
        if data.amount < 0.0 {
            return Err(Error::Validation("amount must be non-negative".to_owned()));
        }

        validate_month(&data.month)?;

        let now = Utc::now();

        let id: DatabaseID = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "INSERT INTO budget
                 (user_id, category_id, amount, currency, exchange_rate, month, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 RETURNING id",
            )?
            .query_row(
                (
                    user_id,
                    data.category_id,
                    data.amount,
                    data.currency,
                    data.exchange_rate,
                    data.month,
                    now,
                    now,
                ),
                |row| row.get(0),
            )?;

        self.get(user_id, id)
    }

    fn get(&self, user_id: UserID, id: DatabaseID) -> Result<Budget, Error> {
        let budget = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "{SELECT_BUDGET} WHERE b.id = :id AND b.user_id = :user_id AND b.deleted_at IS NULL"
            ))?
            .query_row(&[(":id", &id), (":user_id", &user_id)], Self::map_row)?;

        Ok(budget)
    }

    fn get_all(&self, user_id: UserID) -> Result<Vec<Budget>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "{SELECT_BUDGET} WHERE b.user_id = :user_id AND b.deleted_at IS NULL"
            ))?
            .query_map(&[(":user_id", &user_id)], Self::map_row)?
            .map(|maybe_budget| maybe_budget.map_err(Error::SqlError))
            .collect()
    }

    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        data: BudgetUpdate,
    ) -> Result<Budget, Error> {
        if data.amount < 0.0 {
            return Err(Error::Validation("amount must be non-negative".to_owned()));
        }

        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE budget SET amount = ?1, updated_at = ?2
             WHERE id = ?3 AND user_id = ?4 AND deleted_at IS NULL",
            (data.amount, Utc::now(), id, user_id),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        self.get(user_id, id)
    }

    fn soft_delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<DateTime<Utc>, Error> {
        soft_delete_row(&self.connection.lock().unwrap(), "budget", id, user_id)
    }

    fn restore(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error> {
        restore_row(&self.connection.lock().unwrap(), "budget", id, user_id)
    }
}

impl CreateTable for SqliteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                currency TEXT NOT NULL,
                exchange_rate REAL NOT NULL,
                month TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteBudgetStore {
    type ReturnType = Budget;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let category = match row.get::<_, Option<DatabaseID>>(offset + 10)? {
            Some(id) => Some(Category {
                id,
                name: row.get(offset + 11)?,
            }),
            None => None,
        };

        Ok(Budget {
            id: row.get(offset)?,
            user_id: row.get(offset + 1)?,
            category_id: row.get(offset + 2)?,
            category,
            amount: row.get(offset + 3)?,
            currency: row.get(offset + 4)?,
            exchange_rate: row.get(offset + 5)?,
            spent: row.get(offset + 12)?,
            month: row.get(offset + 6)?,
            created_at: row.get(offset + 7)?,
            updated_at: row.get(offset + 8)?,
            deleted_at: row.get(offset + 9)?,
        })
    }
}
