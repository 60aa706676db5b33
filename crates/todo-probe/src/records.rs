//! Payloads returned by the to-do service.
//!
//! Records are observed, never mutated. Field types stay loose where the
//! service is loose (ids may be numbers or strings, tags may be bare names or
//! objects with a `url`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Task or tag identifier as the service renders it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id
    Number(u64),
    /// String id
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A tag attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    /// Expanded tag object
    Linked {
        /// Tag name
        name: String,
        /// Tag detail URL, ending in the tag id
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    /// Bare tag name
    Name(String),
}

impl TagEntry {
    /// Tag name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Linked { name, .. } | Self::Name(name) => name,
        }
    }

    /// Tag id taken from the last segment of its URL
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Linked { url: Some(url), .. } => {
                url.trim_end_matches('/').rsplit('/').next().filter(|s| !s.is_empty())
            }
            _ => None,
        }
    }
}

/// A task as listed by `GET /` or read back from the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned id (absent when read from the UI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Title
    pub title: String,
    /// Tags
    #[serde(default)]
    pub tags: Vec<TagEntry>,
    /// Owner
    pub username: String,
    /// Creation timestamp, `%Y-%m-%dT%H:%M:%S%.fZ`
    pub date: String,
    /// Completion flag
    #[serde(default)]
    pub done: bool,
}

impl Task {
    /// Tag names in the order the service returned them
    #[must_use]
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(TagEntry::name).collect()
    }
}

/// Response of `GET /tags/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDetail {
    /// Tag name
    pub tag: String,
    /// Titles of the tasks linked to the tag
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Response of `GET /tags`: tag name to whatever detail the service adds
pub type TagIndex = BTreeMap<String, serde_json::Value>;

/// Response of `POST /authenticate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Raw token
    pub token: String,
    /// Lifetime in seconds
    pub expires: u64,
}
