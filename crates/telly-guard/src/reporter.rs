//! Error reporting collaborator
//!
//! Background persistence has no caller to return an error to, so failures
//! are handed to an injected reporter instead of being dropped.

use std::sync::{Mutex, PoisonError};

use crate::error::GuardError;

/// Receives non-fatal failures from background work
pub trait ErrorReporter: Send + Sync + 'static {
    /// Report a failure; `context` names the operation that failed
    fn report(&self, context: &str, error: &GuardError);
}

/// Reporter that logs through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, context: &str, error: &GuardError) {
        tracing::error!(context, "{}", error);
    }
}

/// Reporter that logs and keeps the messages for later display
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all collected messages, oldest first
    pub fn drain(&self) -> Vec<String> {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *messages)
    }

    /// Number of messages currently held
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, context: &str, error: &GuardError) {
        tracing::error!(context, "{}", error);
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(format!("{}: {}", context, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_collecting_reporter_drain() {
        let reporter = CollectingReporter::new();
        assert!(reporter.is_empty());

        reporter.report(
            "auth flag write",
            &GuardError::Store(StoreError::Unavailable("offline".to_string())),
        );
        assert_eq!(reporter.len(), 1);

        let messages = reporter.drain();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("auth flag write: Store error"));
        assert!(reporter.is_empty());
    }
}
