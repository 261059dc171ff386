//! Indexing state for one chat.

use chatnav_protocols::{MessageId, MessageRecord};
use chrono::{DateTime, Utc};

/// Index, id counter and URL of the chat currently on the page.
///
/// Records are append-only and ordered by id; ids start at 0 and are
/// never reused until [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct Session {
    url: String,
    records: Vec<MessageRecord>,
    next_id: MessageId,
    started_at: DateTime<Utc>,
    generation: u64,
}

impl Session {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            records: Vec::new(),
            next_id: MessageId(0),
            started_at: Utc::now(),
            generation: 0,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Bumped by every [`reset`](Self::reset). Ids are only meaningful
    /// within one generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identifier the next appended record will receive.
    pub fn next_id(&self) -> MessageId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in discovery order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Append a summary under the next identifier.
    pub fn append(&mut self, text: impl Into<String>) -> MessageId {
        let id = self.next_id;
        self.records.push(MessageRecord::new(id, text));
        self.next_id = id.next();
        id
    }

    /// Copy of the index, newest first.
    pub fn snapshot(&self) -> Vec<MessageRecord> {
        self.records.iter().rev().cloned().collect()
    }

    /// Whether `url` belongs to this session. Exact string comparison.
    pub fn is_current(&self, url: &str) -> bool {
        self.url == url
    }

    /// Start over for `url`. Returns how many records were dropped.
    pub fn reset(&mut self, url: impl Into<String>) -> usize {
        let dropped = self.records.len();
        self.url = url.into();
        self.records.clear();
        self.next_id = MessageId(0);
        self.started_at = Utc::now();
        self.generation += 1;
        dropped
    }
}
