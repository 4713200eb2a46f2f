//! Implements a struct that holds the state of the REST server.

use std::marker::{Send, Sync};

use axum::extract::FromRef;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::stores::{BudgetStore, CategoryStore, ReportStore, TransactionStore, UserStore};

/// The state of the REST server.
///
/// Generic over the store implementations so that route handlers can be
/// exercised against fakes as well as the SQLite stores.
#[derive(Clone)]
pub struct AppState<B, C, R, T, U>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    /// The keys used for signing and verifying auth tokens.
    pub auth_config: AuthConfig,
    /// The store for managing user [budgets](crate::models::Budget).
    pub budget_store: B,
    /// The store for managing [categories](crate::models::Category).
    pub category_store: C,
    /// The store for aggregating transactions into reports.
    pub report_store: R,
    /// The store for managing user [transactions](crate::models::Transaction).
    pub transaction_store: T,
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
}

impl<B, C, R, T, U> AppState<B, C, R, T, U>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    /// Create a new [AppState] with auth keys derived from `jwt_secret`.
    pub fn new(
        jwt_secret: &str,
        budget_store: B,
        category_store: C,
        report_store: R,
        transaction_store: T,
        user_store: U,
    ) -> Self {
        Self {
            auth_config: AuthConfig::new(jwt_secret),
            budget_store,
            category_store,
            report_store,
            transaction_store,
            user_store,
        }
    }
}

/// The keys needed to issue and check auth tokens.
#[derive(Clone)]
pub struct AuthConfig {
    /// The key used to sign new tokens.
    pub encoding_key: EncodingKey,
    /// The key used to verify presented tokens.
    pub decoding_key: DecodingKey,
}

impl AuthConfig {
    /// Create signing and verification keys from a `jwt_secret` string.
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }
}

// this impl tells the auth extractor how to access the keys from our state
impl<B, C, R, T, U> FromRef<AppState<B, C, R, T, U>> for AuthConfig
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<B, C, R, T, U>) -> Self {
        state.auth_config.clone()
    }
}
