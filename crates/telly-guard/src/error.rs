//! Error types for the session guard

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// Result type alias for guard operations
pub type Result<T> = std::result::Result<T, GuardError>;

/// Errors that can occur in the guard and its collaborators
///
/// None of these is fatal to the application: every failure in the lock
/// path degrades to the locked state.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] telly_core::Error),

    /// Store backend error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown lifecycle state string
    #[error("Unknown lifecycle state: {0}")]
    UnknownLifecycle(String),

    /// Unknown route path
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Background persistence task stopped
    #[error("Persistence task stopped: {0}")]
    PersistenceStopped(String),
}
