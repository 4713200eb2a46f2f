//! Defines the category store trait.

use crate::{
    models::{Category, DatabaseID},
    Error,
};

/// Handles the creation and retrieval of categories.
///
/// Categories are global: they are shared by all users and are not
/// soft-deleted.
pub trait CategoryStore {
    /// Create a new category.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `name` is empty, or
    /// [Error::DuplicateCategory] if a category with that name exists.
    fn create(&mut self, name: &str) -> Result<Category, Error>;

    /// Retrieve a category by its `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not refer to a category.
    fn get(&self, id: DatabaseID) -> Result<Category, Error>;

    /// Retrieve all categories, in storage order.
    fn get_all(&self) -> Result<Vec<Category>, Error>;
}
