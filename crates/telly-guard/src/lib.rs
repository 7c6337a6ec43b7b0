//! Telly Guard - PIN-gated session lock for the Telly app
//!
//! This crate provides:
//! - The session guard state machine (initializing / locked / unlocked)
//! - PIN entry with delayed clearing of rejected entries
//! - Lifecycle-driven locking
//! - Route gating for presentation layers
//! - The favorites cache
//! - Key-value store backends and ordered background persistence

pub mod auth;
pub mod config;
pub mod error;
pub mod favorites;
pub mod lifecycle;
pub mod persist;
pub mod reporter;
pub mod router;
pub mod store;

pub use auth::{GuardState, LockScreen, PinEntry, PinOutcome, SessionGuard, UnlockToken};
pub use config::{ConfigError, GuardConfig};
pub use error::{GuardError, Result};
pub use favorites::Favorites;
pub use lifecycle::AppLifecycle;
pub use persist::Persister;
pub use reporter::{CollectingReporter, ErrorReporter, TracingReporter};
pub use router::{Route, RouteGate, View};
pub use store::{FileStore, KeyValueStore, MemoryStore, SharedStore, StoreError};
