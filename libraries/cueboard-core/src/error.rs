//! Catalog error types

use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building or querying a clip catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Clip id not present in the catalog
    #[error("Clip not found: {id}")]
    NotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// Two descriptors declared the same id
    #[error("Duplicate clip id: {id}")]
    DuplicateId {
        /// The id declared more than once
        id: String,
    },

    /// A descriptor declared an empty id
    #[error("Clip id must not be empty")]
    EmptyId,

    /// I/O errors while reading a catalog document
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catalog document parse errors
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}
