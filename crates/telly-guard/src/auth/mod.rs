//! PIN-gated session lock
//!
//! The [`SessionGuard`] owns the locked/unlocked decision. A [`LockScreen`]
//! collects digits while the app is locked and, on a matching entry, hands
//! out an [`UnlockToken`]; the guard only unlocks in exchange for one.
//!
//! # Behaviour
//!
//! - The persisted flag is read once at startup; anything but `"true"`
//!   (including a failed read) resolves to locked
//! - Leaving the foreground locks immediately
//! - A rejected entry shows an error and clears itself after a fixed delay
//! - Store writes never block and never undo an in-memory transition

mod guard;
mod lock_screen;
mod pin;

pub use guard::SessionGuard;
pub use lock_screen::LockScreen;
pub use pin::{PinEntry, PinOutcome, UnlockToken};

/// Session lock state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GuardState {
    /// Persisted flag not read yet; routing must wait
    #[default]
    Initializing,
    /// PIN entry required
    Locked,
    /// Content access permitted
    Unlocked,
}

impl GuardState {
    /// Whether the startup read has resolved
    pub fn is_known(self) -> bool {
        !matches!(self, GuardState::Initializing)
    }

    /// Whether content routes may be shown
    pub fn permits_content(self) -> bool {
        matches!(self, GuardState::Unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(!GuardState::Initializing.is_known());
        assert!(!GuardState::Initializing.permits_content());
        assert!(GuardState::Locked.is_known());
        assert!(!GuardState::Locked.permits_content());
        assert!(GuardState::Unlocked.is_known());
        assert!(GuardState::Unlocked.permits_content());
        assert_eq!(GuardState::default(), GuardState::Initializing);
    }
}
