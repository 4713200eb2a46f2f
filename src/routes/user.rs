//! Route handlers for registering users and fetching the signed-in user.

use std::str::FromStr;

use axum::{extract::State, http::StatusCode, Json};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    auth::Claims,
    models::User,
    state::AppState,
    stores::{BudgetStore, CategoryStore, ReportStore, TransactionStore, UserStore},
    Error,
};

/// The minimum number of characters a password must have.
const MIN_PASSWORD_LENGTH: usize = 8;

/// The data a client sends to register a new user.
#[derive(Deserialize)]
pub struct RegisterData {
    /// The user's display name.
    pub name: String,
    /// The user's email address. Must be unique.
    pub email: String,
    /// The user's plaintext password. Only the hash is stored.
    pub password: String,
}

/// Handler for registration requests.
///
/// # Errors
///
/// Returns a validation error if the email is malformed or the password is
/// too short, and [Error::DuplicateEmail] if the email is already taken.
pub async fn register<B, C, R, T, U>(
    State(mut state): State<AppState<B, C, R, T, U>>,
    Json(data): Json<RegisterData>,
) -> Result<(StatusCode, Json<User>), Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let email = EmailAddress::from_str(&data.email)
        .map_err(|_| Error::Validation("invalid email address".to_owned()))?;

    if data.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let password_hash = bcrypt::hash(&data.password, bcrypt::DEFAULT_COST)
        .map_err(|e| Error::HashingError(e.to_string()))?;

    let user = state.user_store.create(&data.name, &email, &password_hash)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for fetching the signed-in user's own record.
pub async fn get_me<B, C, R, T, U>(
    State(state): State<AppState<B, C, R, T, U>>,
    claims: Claims,
) -> Result<Json<User>, Error>
where
    B: BudgetStore + Clone + Send + Sync,
    C: CategoryStore + Clone + Send + Sync,
    R: ReportStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Clone + Send + Sync,
{
    let user = state.user_store.get(claims.user_id)?;

    Ok(Json(user))
}
