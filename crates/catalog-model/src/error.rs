//! Error types for catalog-model operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Validation failed for {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Duplicate {entity}: {key}")]
    Duplicate { entity: &'static str, key: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Codec(#[from] plain_codec::CodecError),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
