//! Telly Core - Shared catalog types and constants
//!
//! This crate provides the types shared between the session guard and the
//! presentation layers: the catalog records a user can favorite, the keys
//! used in the on-device key-value store, and the PIN length.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ImageLinks, Schedule, Show, ShowId};

/// Number of digits in a complete PIN entry
pub const PIN_LENGTH: usize = 4;

/// Store key for the persisted "was unlocked" flag
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

/// Store key for the persisted favorites list
pub const FAVORITES_KEY: &str = "favorites";

/// Stored flag value meaning unlocked
pub const FLAG_TRUE: &str = "true";

/// Stored flag value meaning locked
pub const FLAG_FALSE: &str = "false";

/// Returns true if `pin` is exactly `PIN_LENGTH` ASCII digits
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_validation() {
        assert!(is_valid_pin("6669"));
        assert!(is_valid_pin("0000"));
        assert!(!is_valid_pin("666"));
        assert!(!is_valid_pin("66690"));
        assert!(!is_valid_pin("66a9"));
        assert!(!is_valid_pin(""));
    }
}
