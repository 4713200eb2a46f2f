//! Implements SQLite backed income and expense reporting.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    models::{Summary, TrendPoint, UserID},
    stores::ReportStore,
    Error,
};

/// Aggregates a user's active transactions straight from SQLite.
#[derive(Debug, Clone)]
pub struct SqliteReportStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteReportStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ReportStore for SqliteReportStore {
    fn summary(&self, user_id: UserID) -> Result<Summary, Error> {
        let (total_income, total_expense) = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT COALESCE(SUM(CASE WHEN kind = 'Income' THEN amount END), 0),
                        COALESCE(SUM(CASE WHEN kind = 'Expense' THEN amount END), 0)
                 FROM \"transaction\"
                 WHERE user_id = :user_id AND deleted_at IS NULL",
            )?
            .query_row(&[(":user_id", &user_id)], |row| {
                Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?))
            })?;

        Ok(Summary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        })
    }

    fn trend(&self, user_id: UserID) -> Result<Vec<TrendPoint>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT strftime('%Y-%m', created_at) AS month,
                        COALESCE(SUM(CASE WHEN kind = 'Income' THEN amount END), 0),
                        COALESCE(SUM(CASE WHEN kind = 'Expense' THEN amount END), 0)
                 FROM \"transaction\"
                 WHERE user_id = :user_id AND deleted_at IS NULL
                 GROUP BY month
                 ORDER BY month ASC",
            )?
            .query_map(&[(":user_id", &user_id)], |row| {
                Ok(TrendPoint {
                    month: row.get(0)?,
                    total_income: row.get(1)?,
                    total_expense: row.get(2)?,
                })
            })?
            .map(|maybe_point| maybe_point.map_err(Error::SqlError))
            .collect()
    }
}

#[cfg(test)]
mod sqlite_report_store_tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        models::{NewTransaction, Summary, TransactionKind, TrendPoint, User},
        stores::{
            sqlite::{SqliteTransactionStore, SqliteUserStore},
            ReportStore, TransactionStore, UserStore,
        },
    };

    use super::SqliteReportStore;

    struct TestFixture {
        connection: Arc<Mutex<Connection>>,
        report_store: SqliteReportStore,
        transaction_store: SqliteTransactionStore,
        user_store: SqliteUserStore,
    }

    fn get_test_fixture() -> TestFixture {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database.");
        let connection = Arc::new(Mutex::new(connection));

        TestFixture {
            connection: connection.clone(),
            report_store: SqliteReportStore::new(connection.clone()),
            transaction_store: SqliteTransactionStore::new(connection.clone()),
            user_store: SqliteUserStore::new(connection),
        }
    }

    /// Insert a transaction stamped with `date` rather than the current
    /// time. The store always stamps rows with now, so back-dated rows for
    /// month bucketing tests have to go through SQL directly.
    fn insert_transaction_on_date(
        fixture: &TestFixture,
        user_id: i64,
        kind: &str,
        amount: f64,
        date: &str,
    ) {
        let timestamp: chrono::DateTime<chrono::Utc> =
            format!("{date}T12:00:00Z").parse().unwrap();

        fixture
            .connection
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO \"transaction\"
                 (kind, amount, currency, exchange_rate, user_id, created_at, updated_at)
                 VALUES (?1, ?2, 'IDR', 1.0, ?3, ?4, ?4)",
                (kind, amount, user_id, timestamp),
            )
            .expect("Could not insert transaction");
    }

    fn create_test_user(fixture: &mut TestFixture, email: &str) -> User {
        fixture
            .user_store
            .create(
                "Test User",
                &EmailAddress::from_str(email).unwrap(),
                "notarealhash",
            )
            .expect("Could not create test user")
    }

    fn new_transaction(kind: TransactionKind, amount: f64) -> NewTransaction {
        NewTransaction {
            kind,
            amount,
            currency: "IDR".to_owned(),
            exchange_rate: 1.0,
            note: None,
            category_id: None,
        }
    }

    #[test]
    fn summary_of_empty_ledger_is_all_zeroes() {
        let mut fixture = get_test_fixture();
        let user = create_test_user(&mut fixture, "test@test.com");

        let summary = fixture.report_store.summary(user.id).unwrap();

        assert_eq!(
            summary,
            Summary {
                total_income: 0.0,
                total_expense: 0.0,
                balance: 0.0
            }
        );
    }

    #[test]
    fn summary_totals_active_transactions() {
        let mut fixture = get_test_fixture();
        let user = create_test_user(&mut fixture, "test@test.com");
        let other = create_test_user(&mut fixture, "other@test.com");

        fixture
            .transaction_store
            .create(user.id, new_transaction(TransactionKind::Income, 5000.0))
            .unwrap();
        fixture
            .transaction_store
            .create(user.id, new_transaction(TransactionKind::Expense, 1200.0))
            .unwrap();
        fixture
            .transaction_store
            .create(other.id, new_transaction(TransactionKind::Income, 999.0))
            .unwrap();

        let summary = fixture.report_store.summary(user.id).unwrap();

        assert_eq!(summary.total_income, 5000.0);
        assert_eq!(summary.total_expense, 1200.0);
        assert_eq!(summary.balance, 3800.0);
    }

    #[test]
    fn summary_excludes_soft_deleted_transactions() {
        let mut fixture = get_test_fixture();
        let user = create_test_user(&mut fixture, "test@test.com");

        fixture
            .transaction_store
            .create(user.id, new_transaction(TransactionKind::Income, 5000.0))
            .unwrap();
        let deleted = fixture
            .transaction_store
            .create(user.id, new_transaction(TransactionKind::Expense, 1200.0))
            .unwrap();
        fixture
            .transaction_store
            .soft_delete(user.id, deleted.id)
            .unwrap();

        let summary = fixture.report_store.summary(user.id).unwrap();

        assert_eq!(summary.total_expense, 0.0);
        assert_eq!(summary.balance, 5000.0);
    }

    #[test]
    fn trend_groups_by_month_in_ascending_order() {
        let mut fixture = get_test_fixture();
        let user = create_test_user(&mut fixture, "test@test.com");

        fixture
            .transaction_store
            .create(user.id, new_transaction(TransactionKind::Income, 5000.0))
            .unwrap();
        fixture
            .transaction_store
            .create(user.id, new_transaction(TransactionKind::Expense, 1200.0))
            .unwrap();

        let trend = fixture.report_store.trend(user.id).unwrap();

        assert_eq!(trend.len(), 1);
        let this_month = chrono::Utc::now().format("%Y-%m").to_string();
        assert_eq!(trend[0].month, this_month);
        assert_eq!(trend[0].total_income, 5000.0);
        assert_eq!(trend[0].total_expense, 1200.0);
    }

    #[test]
    fn trend_orders_months_ascending_without_duplicates() {
        let mut fixture = get_test_fixture();
        let user = create_test_user(&mut fixture, "test@test.com");

        // Inserted newest month first so the ordering comes from the
        // query, not from insertion order.
        insert_transaction_on_date(&fixture, user.id, "Income", 100.0, "2025-03-31");
        insert_transaction_on_date(&fixture, user.id, "Expense", 300.0, "2025-02-01");
        insert_transaction_on_date(&fixture, user.id, "Income", 5000.0, "2025-01-15");
        insert_transaction_on_date(&fixture, user.id, "Expense", 200.0, "2025-01-20");

        let trend = fixture.report_store.trend(user.id).unwrap();

        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    month: "2025-01".to_owned(),
                    total_income: 5000.0,
                    total_expense: 200.0,
                },
                TrendPoint {
                    month: "2025-02".to_owned(),
                    total_income: 0.0,
                    total_expense: 300.0,
                },
                TrendPoint {
                    month: "2025-03".to_owned(),
                    total_income: 100.0,
                    total_expense: 0.0,
                },
            ]
        );
    }

    #[test]
    fn trend_of_empty_ledger_is_empty() {
        let mut fixture = get_test_fixture();
        let user = create_test_user(&mut fixture, "test@test.com");

        assert_eq!(fixture.report_store.trend(user.id).unwrap(), vec![]);
    }
}
