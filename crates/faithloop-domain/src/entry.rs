//! Entry module - the user-authored check-in

use crate::context::UserId;
use crate::demo::is_demo_tagged;
use crate::mood::Mood;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an entry (UUIDv7, chronologically sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(uuid::Uuid);

impl EntryId {
    /// Generate a new UUIDv7-based EntryId
    ///
    /// # Examples
    ///
    /// ```
    /// use faithloop_domain::EntryId;
    ///
    /// let a = EntryId::new();
    /// let b = EntryId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse an EntryId from its string form
    ///
    /// # Examples
    ///
    /// ```
    /// use faithloop_domain::EntryId;
    ///
    /// let id = EntryId::new();
    /// let parsed = EntryId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid entry id: {}", e))
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted check-in
///
/// Entries have no update path: once an extraction has been derived from an
/// entry the entry is treated as immutable, and re-extraction appends a new
/// extraction record instead of rewriting anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier
    pub id: EntryId,

    /// Owning user
    pub user_id: UserId,

    /// Free-text body
    pub content: String,

    /// Mood recorded with the check-in
    pub mood: Mood,

    /// Tags (a set; order carries no meaning)
    pub tags: Vec<String>,

    /// Arbitrary metadata (energy level, seed bookkeeping, ...)
    pub metadata: serde_json::Value,

    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Whether this entry carries the demo sentinel tag
    pub fn is_demo(&self) -> bool {
        is_demo_tagged(&self.tags)
    }

    /// Whether the entry carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// An entry that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// Free-text body
    pub content: String,

    /// Mood recorded with the check-in
    pub mood: Mood,

    /// Tags, de-duplicated
    pub tags: Vec<String>,

    /// Arbitrary metadata
    pub metadata: serde_json::Value,

    /// Explicit creation time; the store uses the request clock when `None`
    pub created_at: Option<DateTime<Utc>>,
}

impl NewEntry {
    /// Create an untagged entry with empty metadata
    pub fn new(content: impl Into<String>, mood: Mood) -> Self {
        Self {
            content: content.into(),
            mood,
            tags: Vec::new(),
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: None,
        }
    }

    /// Set the tags, dropping blanks and repeats
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.clear();
        for tag in tags {
            let tag = tag.into().trim().to_string();
            if !tag.is_empty() && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Set the metadata mapping
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Pin the creation time
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}
