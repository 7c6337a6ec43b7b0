//! In-process store backend

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StoreError};

#[derive(Default)]
struct Inner {
    entries: HashMap<String, String>,
    /// Every successful write, in order
    writes: Vec<(String, String)>,
    fail_reads: bool,
    fail_writes: bool,
}

/// Store backed by a map in memory
///
/// Nothing survives the process. Reads and writes can be made to fail on
/// demand, and every successful write is recorded, which makes this the
/// backend of choice for exercising the guard's degraded paths.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: RwLock::new(Inner {
                entries,
                ..Inner::default()
            }),
        }
    }

    /// Make subsequent reads fail
    pub async fn set_read_failure(&self, fail: bool) {
        self.inner.write().await.fail_reads = fail;
    }

    /// Make subsequent writes fail
    pub async fn set_write_failure(&self, fail: bool) {
        self.inner.write().await.fail_writes = fail;
    }

    /// Successful writes so far, oldest first
    pub async fn writes(&self) -> Vec<(String, String)> {
        self.inner.read().await.writes.clone()
    }

    /// Successful writes to one key, oldest first
    pub async fn writes_to(&self, key: &str) -> Vec<String> {
        self.inner
            .read()
            .await
            .writes
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.inner.read().await;
        if inner.fail_reads {
            return Err(StoreError::Unavailable("read failure injected".to_string()));
        }
        Ok(inner.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.fail_writes {
            return Err(StoreError::Unavailable("write failure injected".to_string()));
        }
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}
