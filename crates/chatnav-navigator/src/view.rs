//! View state handed to whatever renders the navigator.

use std::time::Duration;

use chatnav_protocols::MessageId;

/// What the message list should currently display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing fetched yet.
    #[default]
    Loading,
    /// The indexer answered with at least one message.
    Ready,
    /// The indexer answered and its index is empty.
    Empty,
    /// The indexer could not be reached. Never shown as `Empty`.
    Disconnected(String),
}

impl ViewState {
    pub fn is_connected(&self) -> bool {
        !matches!(self, ViewState::Disconnected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Info,
    Error,
}

/// Transient notice shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
        }
    }
}

/// Result of selecting an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOutcome {
    pub feedback: Option<Feedback>,
    /// When the navigator surface should close; `None` keeps it open.
    pub close_after: Option<Duration>,
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: MessageId,
    /// `#k`, numbered from the oldest message in the current view.
    pub badge: String,
    pub text: String,
    pub age: String,
}
