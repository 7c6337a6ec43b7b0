//! Fire-and-forget persistence
//!
//! Writes are queued to a single background task per owner so they reach
//! the store in the order they were issued. Callers never wait on a write;
//! failures go to the injected [`ErrorReporter`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::GuardError;
use crate::reporter::ErrorReporter;
use crate::store::SharedStore;

enum Command {
    Write { key: String, value: String },
    Flush(oneshot::Sender<()>),
}

/// Ordered background writer for one store
pub struct Persister {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Persister {
    /// Start the writer task
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn(store: SharedStore, reporter: Arc<dyn ErrorReporter>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task_reporter = Arc::clone(&reporter);

        let task = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Write { key, value } => {
                        if let Err(e) = store.set(&key, &value).await {
                            task_reporter.report(&format!("write {}", key), &e.into());
                        } else {
                            tracing::debug!(key = %key, "Persisted value");
                        }
                    }
                    Command::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self { tx, task, reporter }
    }

    /// Queue a write; returns immediately
    pub fn write(&self, key: &str, value: impl Into<String>) {
        let command = Command::Write {
            key: key.to_string(),
            value: value.into(),
        };
        if self.tx.send(command).is_err() {
            self.reporter.report(
                &format!("write {}", key),
                &GuardError::PersistenceStopped("writer task is not running".to_string()),
            );
        }
    }

    /// The reporter failures are sent to
    pub fn reporter(&self) -> &Arc<dyn ErrorReporter> {
        &self.reporter
    }

    /// Wait until every write queued so far has been attempted
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Drain queued writes and stop the writer task
    pub async fn shutdown(self) {
        let Self { tx, task, reporter } = self;
        drop(tx);
        if let Err(e) = task.await {
            reporter.report(
                "persistence shutdown",
                &GuardError::PersistenceStopped(e.to_string()),
            );
        }
    }
}
