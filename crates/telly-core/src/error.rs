//! Error types for the Telly core types

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid show id: {0}")]
    InvalidShowId(String),

    #[error("Malformed favorites list: {0}")]
    MalformedFavorites(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
