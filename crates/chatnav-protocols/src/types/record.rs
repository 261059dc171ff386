//! Message records and their identifiers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sequential identifier of an indexed user message.
///
/// Assigned in discovery order starting at 0 for every session and never
/// reused within that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl MessageId {
    pub fn value(self) -> u64 {
        self.0
    }

    /// The identifier following this one.
    pub fn next(self) -> Self {
        MessageId(self.0 + 1)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageId {
    fn from(value: u64) -> Self {
        MessageId(value)
    }
}

/// One discovered user message.
///
/// Owned by the indexer; navigators only ever receive copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: MessageId,
    /// Normalized summary: attachment annotations, collapsed text, truncated.
    pub text: String,
    /// Indexing time. Display only; ordering is always by `id`.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub discovered_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Create a record stamped with the current time.
    pub fn new(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            discovered_at: Utc::now(),
        }
    }

    /// Override the discovery timestamp.
    pub fn with_discovered_at(mut self, discovered_at: DateTime<Utc>) -> Self {
        self.discovered_at = discovered_at;
        self
    }

    /// Case-insensitive substring match against the summary text.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty() || self.text.to_lowercase().contains(needle_lower)
    }
}
