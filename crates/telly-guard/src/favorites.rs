//! Favorites cache
//!
//! The whole list lives in memory and is written back as one JSON blob
//! after every change. Writes go through the same background path as the
//! session flag, so a slow store never stalls the UI.

use std::sync::Arc;

use telly_core::{Show, ShowId, FAVORITES_KEY};

use crate::error::GuardError;
use crate::persist::Persister;
use crate::reporter::ErrorReporter;
use crate::store::SharedStore;

/// Favorited shows, persisted on-device
pub struct Favorites {
    shows: Vec<Show>,
    persister: Persister,
}

impl Favorites {
    /// Load the stored list
    ///
    /// A missing, unreadable or malformed list starts empty; read and
    /// decode failures are reported.
    pub async fn load(store: SharedStore, reporter: Arc<dyn ErrorReporter>) -> Self {
        let shows = match store.get(FAVORITES_KEY).await {
            Ok(Some(blob)) => Show::decode_list(&blob).unwrap_or_else(|e| {
                reporter.report("decode favorites", &GuardError::from(e));
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                reporter.report("read favorites", &GuardError::from(e));
                Vec::new()
            }
        };

        tracing::debug!(count = shows.len(), "Loaded favorites");

        Self {
            shows,
            persister: Persister::spawn(store, reporter),
        }
    }

    /// Favorites in the order they were added
    pub fn list(&self) -> &[Show] {
        &self.shows
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    pub fn is_favorite(&self, id: ShowId) -> bool {
        self.shows.iter().any(|s| s.id == id)
    }

    /// Add a show; returns false if it was already a favorite
    pub fn add(&mut self, show: Show) -> bool {
        if self.is_favorite(show.id) {
            return false;
        }
        self.shows.push(show);
        self.persist();
        true
    }

    /// Remove a show; returns false if it was not a favorite
    pub fn remove(&mut self, id: ShowId) -> bool {
        let before = self.shows.len();
        self.shows.retain(|s| s.id != id);
        if self.shows.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Add or remove; returns whether the show is a favorite afterwards
    pub fn toggle(&mut self, show: Show) -> bool {
        if self.is_favorite(show.id) {
            self.remove(show.id);
            false
        } else {
            self.add(show)
        }
    }

    /// Wait for every write issued so far
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    /// Drain pending writes and stop the writer
    pub async fn shutdown(self) {
        self.persister.shutdown().await;
    }

    fn persist(&self) {
        match Show::encode_list(&self.shows) {
            Ok(blob) => self.persister.write(FAVORITES_KEY, blob),
            Err(e) => self
                .persister
                .reporter()
                .report("encode favorites", &GuardError::from(e)),
        }
    }
}
