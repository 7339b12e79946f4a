use thiserror::Error;

/// Errors from inventory edits. The estimator itself cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    /// No category with the given id exists in the inventory.
    #[error("no device category with id '{id}'")]
    CategoryNotFound { id: String },

    /// A category with this id already exists.
    #[error("device category '{id}' already exists")]
    DuplicateCategory { id: String },
}
