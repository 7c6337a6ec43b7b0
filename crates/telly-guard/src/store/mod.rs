//! On-device key-value storage
//!
//! The guard and the favorites cache only ever see opaque string values
//! under fixed keys. Two backends are provided: an in-process map and a
//! single JSON file under the user's data directory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Shared handle to a store backend
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing data could not be parsed
    #[error("Store data is corrupt: {0}")]
    Corrupt(String),

    /// Store is not reachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read a value; `Ok(None)` when the key has never been written
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
