use thiserror::Error;

use crate::model::ObjectType;

/// Crate-wide error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The named object (or synonym) does not exist in any visible namespace
    #[error("object not found: {0}")]
    NotFound(String),

    /// An identifier resolved to more than one row where exactly one was expected
    #[error("ambiguous identifier: {0}")]
    Ambiguous(String),

    /// No detail or DDL handler exists for this object type
    #[error("unsupported object type: {0}")]
    Unsupported(ObjectType),

    /// Malformed identifier, non-positive page size, or other bad caller input
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// SQLite-level failure from the backing store
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Backend-agnostic storage failure (used by non-SQLite stores and mocks)
    #[error("storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    /// True when the error means "zero rows", as opposed to a real failure.
    /// Callers use this to fall through rather than abort.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
