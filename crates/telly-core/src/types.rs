//! Catalog records and newtypes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Catalog identifier of a show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowId(pub u64);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShowId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| Error::InvalidShowId(s.to_string()))
    }
}

/// Poster image links in two resolutions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLinks {
    pub medium: String,
    pub original: String,
}

/// Airing schedule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub days: Vec<String>,
}

/// A TV series as returned by the catalog and stored in favorites
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub image: Option<ImageLinks>,
    /// HTML summary, rendered by the presentation layer
    #[serde(default)]
    pub summary: Option<String>,
}

impl Show {
    /// Minimal show record with only an id and a name
    pub fn new(id: ShowId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: String::new(),
            genres: Vec::new(),
            schedule: Schedule::default(),
            image: None,
            summary: None,
        }
    }

    /// Decode a stored favorites blob
    pub fn decode_list(blob: &str) -> crate::Result<Vec<Show>> {
        serde_json::from_str(blob).map_err(|e| Error::MalformedFavorites(e.to_string()))
    }

    /// Encode a favorites list for storage
    pub fn encode_list(shows: &[Show]) -> crate::Result<String> {
        Ok(serde_json::to_string(shows)?)
    }
}
