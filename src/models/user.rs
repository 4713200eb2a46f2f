//! Defines the `User` type, the account that owns transactions and budgets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::UserID;

/// A registered user of the application.
///
/// The password hash is never serialized into responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's database ID.
    pub id: UserID,
    /// The user's display name.
    pub name: String,
    /// The user's email address, unique across all users.
    pub email: String,
    /// The bcrypt hash of the user's password.
    #[serde(skip)]
    pub password_hash: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user record was last modified.
    pub updated_at: DateTime<Utc>,
    /// When the user was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,
}
