//! Session guard state machine

use std::sync::Arc;

use telly_core::{AUTH_FLAG_KEY, FLAG_FALSE, FLAG_TRUE};
use tokio::sync::watch;

use super::pin::UnlockToken;
use super::GuardState;
use crate::lifecycle::AppLifecycle;
use crate::persist::Persister;
use crate::reporter::ErrorReporter;
use crate::store::SharedStore;

/// Decides whether content may be shown
///
/// Starts in [`GuardState::Initializing`] and resolves on [`init`]. After
/// that it moves between `Locked` and `Unlocked`: unlocking needs an
/// [`UnlockToken`] from a matching PIN entry, locking happens whenever the
/// app leaves the foreground. Every transition is persisted in the
/// background; a failed write is reported and the in-memory state stands.
///
/// [`init`]: SessionGuard::init
pub struct SessionGuard {
    store: SharedStore,
    persister: Persister,
    state_tx: watch::Sender<GuardState>,
    /// Lock requested while the startup read was still in flight
    lock_on_resolve: bool,
}

impl SessionGuard {
    /// Create a guard in the `Initializing` state
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn new(store: SharedStore, reporter: Arc<dyn ErrorReporter>) -> Self {
        let persister = Persister::spawn(Arc::clone(&store), reporter);
        let (state_tx, _) = watch::channel(GuardState::Initializing);
        Self {
            store,
            persister,
            state_tx,
            lock_on_resolve: false,
        }
    }

    /// Read the persisted flag and resolve the initial state
    ///
    /// Only exactly `"true"` unlocks. A missing value, any other value, or a
    /// failed read all resolve to `Locked`. The read happens once; later
    /// calls return the current state without touching the store.
    pub async fn init(&mut self) -> GuardState {
        if self.state().is_known() {
            tracing::warn!("Session guard already initialized");
            return self.state();
        }

        let resolved = match self.store.get(AUTH_FLAG_KEY).await {
            Ok(Some(value)) if value == FLAG_TRUE => GuardState::Unlocked,
            Ok(Some(value)) => {
                if value != FLAG_FALSE {
                    tracing::warn!(%value, "Unexpected stored auth flag, treating as locked");
                }
                GuardState::Locked
            }
            Ok(None) => GuardState::Locked,
            Err(e) => {
                self.persister
                    .reporter()
                    .report("read auth flag", &e.into());
                GuardState::Locked
            }
        };

        tracing::info!(state = ?resolved, "Session guard initialized");
        self.set_state(resolved);

        if std::mem::take(&mut self.lock_on_resolve) {
            self.lock("left foreground during startup");
        }

        self.state()
    }

    /// Current state
    pub fn state(&self) -> GuardState {
        *self.state_tx.borrow()
    }

    /// Observe state changes
    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state_tx.subscribe()
    }

    /// Unlock after a matching PIN entry
    ///
    /// Returns true if the state changed. The token is spent either way.
    pub fn unlock(&mut self, token: UnlockToken) -> bool {
        drop(token);
        match self.state() {
            GuardState::Locked => {
                tracing::info!("Session unlocked");
                self.set_state(GuardState::Unlocked);
                self.persister.write(AUTH_FLAG_KEY, FLAG_TRUE);
                true
            }
            GuardState::Unlocked => {
                tracing::debug!("Unlock requested while already unlocked");
                false
            }
            GuardState::Initializing => {
                tracing::warn!("Unlock requested before initialization, ignoring");
                false
            }
        }
    }

    /// Apply a lifecycle change from the host
    ///
    /// Moving to `Inactive` or `Background` locks immediately. `Active`
    /// never unlocks. Returns true if the state changed.
    pub fn on_lifecycle(&mut self, event: AppLifecycle) -> bool {
        if !event.should_lock() {
            return false;
        }

        match self.state() {
            GuardState::Unlocked => self.lock(event.as_str()),
            GuardState::Initializing => {
                self.lock_on_resolve = true;
                false
            }
            GuardState::Locked => false,
        }
    }

    /// Lock on explicit user request
    pub fn logout(&mut self) -> bool {
        self.lock("logout")
    }

    /// Wait for every persistence write issued so far
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    /// Drain pending writes and shut the guard down
    pub async fn teardown(self) {
        tracing::debug!("Tearing down session guard");
        self.persister.shutdown().await;
    }

    fn lock(&mut self, reason: &str) -> bool {
        if self.state() != GuardState::Unlocked {
            return false;
        }
        tracing::info!(reason, "Session locked");
        self.set_state(GuardState::Locked);
        self.persister.write(AUTH_FLAG_KEY, FLAG_FALSE);
        true
    }

    fn set_state(&self, state: GuardState) {
        self.state_tx.send_replace(state);
    }
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{PinEntry, PinOutcome};
    use crate::reporter::CollectingReporter;
    use crate::store::{KeyValueStore, MemoryStore};

    fn token() -> UnlockToken {
        UnlockToken::new()
    }

    async fn guard_with(store: Arc<MemoryStore>) -> (SessionGuard, Arc<CollectingReporter>) {
        let reporter = Arc::new(CollectingReporter::new());
        let mut guard = SessionGuard::new(store, reporter.clone());
        guard.init().await;
        (guard, reporter)
    }

    #[tokio::test]
    async fn test_starts_initializing() {
        let guard = SessionGuard::new(
            Arc::new(MemoryStore::new()),
            Arc::new(CollectingReporter::new()),
        );
        assert_eq!(guard.state(), GuardState::Initializing);
        assert!(!guard.state().is_known());
    }

    #[tokio::test]
    async fn test_init_resolves_from_flag() {
        let store = Arc::new(MemoryStore::with_entries([(AUTH_FLAG_KEY, "true")]));
        let (guard, _) = guard_with(store).await;
        assert_eq!(guard.state(), GuardState::Unlocked);

        let store = Arc::new(MemoryStore::with_entries([(AUTH_FLAG_KEY, "false")]));
        let (guard, _) = guard_with(store).await;
        assert_eq!(guard.state(), GuardState::Locked);
    }

    #[tokio::test]
    async fn test_init_twice_reads_once() {
        let store = Arc::new(MemoryStore::new());
        let (mut guard, _) = guard_with(store.clone()).await;
        assert_eq!(guard.state(), GuardState::Locked);

        // A flag written behind the guard's back is not picked up
        store.set(AUTH_FLAG_KEY, FLAG_TRUE).await.unwrap();
        assert_eq!(guard.init().await, GuardState::Locked);
    }

    #[tokio::test]
    async fn test_read_failure_is_reported() {
        let store = Arc::new(MemoryStore::with_entries([(AUTH_FLAG_KEY, "true")]));
        store.set_read_failure(true).await;
        let (guard, reporter) = guard_with(store).await;

        assert_eq!(guard.state(), GuardState::Locked);
        let messages = reporter.drain();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("read auth flag"));
    }

    #[tokio::test]
    async fn test_unlock_and_lock_persist() {
        let store = Arc::new(MemoryStore::new());
        let (mut guard, _) = guard_with(store.clone()).await;

        assert!(guard.unlock(token()));
        assert!(!guard.unlock(token()));
        assert!(guard.on_lifecycle(AppLifecycle::Background));
        assert!(!guard.on_lifecycle(AppLifecycle::Inactive));
        guard.flush().await;

        assert_eq!(guard.state(), GuardState::Locked);
        assert_eq!(store.writes_to(AUTH_FLAG_KEY).await, vec!["true", "false"]);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_state() {
        let store = Arc::new(MemoryStore::new());
        store.set_write_failure(true).await;
        let (mut guard, reporter) = guard_with(store.clone()).await;

        assert!(guard.unlock(token()));
        guard.flush().await;

        assert_eq!(guard.state(), GuardState::Unlocked);
        assert_eq!(reporter.len(), 1);
        assert!(store.writes().await.is_empty());
    }

    #[tokio::test]
    async fn test_active_never_unlocks() {
        let store = Arc::new(MemoryStore::new());
        let (mut guard, _) = guard_with(store.clone()).await;

        assert!(!guard.on_lifecycle(AppLifecycle::Active));
        guard.flush().await;
        assert_eq!(guard.state(), GuardState::Locked);
        assert!(store.writes().await.is_empty());
    }

    #[tokio::test]
    async fn test_unlock_before_init_ignored() {
        let mut guard = SessionGuard::new(
            Arc::new(MemoryStore::new()),
            Arc::new(CollectingReporter::new()),
        );
        assert!(!guard.unlock(token()));
        assert_eq!(guard.state(), GuardState::Initializing);
    }

    #[tokio::test]
    async fn test_background_during_startup_locks_on_resolve() {
        let store = Arc::new(MemoryStore::with_entries([(AUTH_FLAG_KEY, "true")]));
        let mut guard = SessionGuard::new(store.clone(), Arc::new(CollectingReporter::new()));

        assert!(!guard.on_lifecycle(AppLifecycle::Background));
        assert_eq!(guard.init().await, GuardState::Locked);
        guard.flush().await;
        assert_eq!(store.writes_to(AUTH_FLAG_KEY).await, vec!["false"]);
    }

    #[tokio::test]
    async fn test_logout() {
        let store = Arc::new(MemoryStore::with_entries([(AUTH_FLAG_KEY, "true")]));
        let (mut guard, _) = guard_with(store.clone()).await;

        assert!(guard.logout());
        assert!(!guard.logout());
        guard.teardown().await;
        assert_eq!(store.writes_to(AUTH_FLAG_KEY).await, vec!["false"]);
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let store = Arc::new(MemoryStore::new());
        let reporter = Arc::new(CollectingReporter::new());
        let mut guard = SessionGuard::new(store, reporter);
        let mut rx = guard.subscribe();
        assert_eq!(*rx.borrow_and_update(), GuardState::Initializing);

        guard.init().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), GuardState::Locked);

        let mut entry = PinEntry::new("6669");
        let mut accepted = None;
        for digit in "6669".chars() {
            if let PinOutcome::Accepted(token) = entry.submit_digit(digit) {
                accepted = Some(token);
            }
        }
        assert!(guard.unlock(accepted.unwrap()));
        assert_eq!(*rx.borrow_and_update(), GuardState::Unlocked);
    }
}
