//! Defines the user store trait.

use email_address::EmailAddress;

use crate::{
    models::{User, UserID},
    Error,
};

/// Handles the creation and retrieval of users.
pub trait UserStore {
    /// Create a new user.
    ///
    /// `password_hash` must already be hashed; this store never sees raw
    /// passwords.
    ///
    /// # Errors
    /// Returns [Error::DuplicateEmail] if a user with `email` already
    /// exists.
    fn create(&mut self, name: &str, email: &EmailAddress, password_hash: &str)
        -> Result<User, Error>;

    /// Retrieve a user by their `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a user.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Retrieve a user by their email address.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no user has the address `email`.
    fn get_by_email(&self, email: &str) -> Result<User, Error>;
}
