//! Lock screen session with delayed clearing of rejected entries

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::pin::{PinEntry, PinOutcome};
use crate::config::GuardConfig;

/// Pending clear of a rejected entry
///
/// The timer task is aborted when this handle is dropped, so a torn-down
/// lock screen is never mutated after the fact.
struct ClearTimer {
    handle: JoinHandle<()>,
}

impl ClearTimer {
    fn spawn(entry: Arc<Mutex<PinEntry>>, delay: Duration) -> Self {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            entry.lock().unwrap_or_else(PoisonError::into_inner).clear();
            tracing::debug!("Cleared rejected PIN entry");
        });
        Self { handle }
    }

    fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ClearTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// One mount of the PIN entry UI
///
/// Created when the lock screen is shown and dropped when it is dismissed
/// or the entry is accepted. Must be used from within a Tokio runtime,
/// since a rejected entry schedules its clear on a task.
pub struct LockScreen {
    entry: Arc<Mutex<PinEntry>>,
    clear_delay: Duration,
    pending_clear: Option<ClearTimer>,
}

impl LockScreen {
    /// Create a lock screen checking against `expected_pin`
    pub fn new(expected_pin: impl Into<String>, clear_delay: Duration) -> Self {
        Self {
            entry: Arc::new(Mutex::new(PinEntry::new(expected_pin))),
            clear_delay,
            pending_clear: None,
        }
    }

    /// Create a lock screen from the guard configuration
    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(config.expected_pin.clone(), config.pin_clear_delay())
    }

    /// Feed one digit from the keypad
    ///
    /// A rejected entry schedules a clear after the configured delay. A
    /// newer rejection replaces any clear still pending.
    pub fn submit_digit(&mut self, digit: char) -> PinOutcome {
        let outcome = self.entry().submit_digit(digit);
        match outcome {
            PinOutcome::Rejected => {
                let timer = ClearTimer::spawn(Arc::clone(&self.entry), self.clear_delay);
                self.pending_clear = Some(timer);
            }
            PinOutcome::Accepted(_) => {
                self.pending_clear = None;
            }
            PinOutcome::Pending | PinOutcome::Ignored => {}
        }
        outcome
    }

    /// Remove the last digit
    pub fn backspace(&mut self) {
        self.entry().backspace();
    }

    /// Number of digits currently shown
    pub fn digit_count(&self) -> usize {
        self.entry().len()
    }

    /// Whether the incorrect-PIN message should be shown
    pub fn has_error(&self) -> bool {
        self.entry().has_error()
    }

    /// Whether a rejected entry is waiting to be cleared
    pub fn has_pending_clear(&self) -> bool {
        self.pending_clear
            .as_ref()
            .map(ClearTimer::is_pending)
            .unwrap_or(false)
    }

    fn entry(&self) -> MutexGuard<'_, PinEntry> {
        self.entry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for LockScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockScreen")
            .field("digits", &self.digit_count())
            .field("error", &self.has_error())
            .field("pending_clear", &self.has_pending_clear())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const DELAY: Duration = Duration::from_millis(1000);

    fn enter(screen: &mut LockScreen, digits: &str) -> Vec<PinOutcome> {
        digits.chars().map(|d| screen.submit_digit(d)).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_entry_clears_after_delay() {
        let mut screen = LockScreen::new("6669", DELAY);
        let outcomes = enter(&mut screen, "1234");
        assert_eq!(outcomes[3], PinOutcome::Rejected);
        assert!(screen.has_error());
        assert!(screen.has_pending_clear());

        sleep(Duration::from_millis(999)).await;
        assert!(screen.has_error());
        assert_eq!(screen.digit_count(), 4);

        sleep(Duration::from_millis(2)).await;
        assert!(!screen.has_error());
        assert_eq!(screen.digit_count(), 0);
        assert!(!screen.has_pending_clear());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifth_digit_ignored_before_clear() {
        let mut screen = LockScreen::new("6669", DELAY);
        let _ = enter(&mut screen, "1111");

        assert_eq!(screen.submit_digit('6'), PinOutcome::Ignored);
        assert_eq!(screen.digit_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_rejection_wins() {
        let mut screen = LockScreen::new("6669", DELAY);
        let _ = enter(&mut screen, "1111");

        // Correct the last digit and get rejected again half-way through
        sleep(Duration::from_millis(500)).await;
        screen.backspace();
        assert_eq!(screen.submit_digit('2'), PinOutcome::Rejected);

        // The first clear would have fired here
        sleep(Duration::from_millis(600)).await;
        assert!(screen.has_error());
        assert_eq!(screen.digit_count(), 4);

        sleep(Duration::from_millis(500)).await;
        assert!(!screen.has_error());
        assert_eq!(screen.digit_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending_clear() {
        let mut screen = LockScreen::new("6669", DELAY);
        let _ = enter(&mut screen, "0000");
        let entry = Arc::clone(&screen.entry);

        drop(screen);
        sleep(Duration::from_millis(1500)).await;

        let entry = entry.lock().unwrap();
        assert!(entry.has_error());
        assert_eq!(entry.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_accepted_entry() {
        let mut screen = LockScreen::new("6669", DELAY);
        let outcomes = enter(&mut screen, "6669");

        assert!(matches!(outcomes[3], PinOutcome::Accepted(_)));
        assert_eq!(screen.digit_count(), 0);
        assert!(!screen.has_pending_clear());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_after_clear() {
        let mut screen = LockScreen::new("6669", DELAY);
        let _ = enter(&mut screen, "1234");
        sleep(DELAY + Duration::from_millis(1)).await;

        let outcomes = enter(&mut screen, "6669");
        assert!(matches!(outcomes[3], PinOutcome::Accepted(_)));
    }
}
