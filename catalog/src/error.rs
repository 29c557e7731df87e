use thiserror::Error;

use crate::models::ProductId;

/// A convenient result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The draft was rejected before any I/O took place.
    #[error("{0}")]
    Validation(String),

    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The backing document could not be read or written. The reason is
    /// kept short; transports map it to a generic message for clients.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn validation<S: Into<String>>(reason: S) -> Self {
        CatalogError::Validation(reason.into())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}
