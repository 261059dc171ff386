//! Host page errors.

use thiserror::Error;

use crate::types::MessageId;

#[derive(Debug, Error)]
pub enum PageError {
    /// The host rejected a selector (malformed or unsupported syntax).
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Element {0} is no longer attached")]
    ElementDetached(i64),

    #[error("Element {element} already carries tag {existing}")]
    AlreadyTagged { element: i64, existing: MessageId },

    #[error("Host error: {0}")]
    Host(String),

    #[error("Host page disconnected")]
    Disconnected,
}

impl PageError {
    /// Selector errors are recovered locally by the scan and never surfaced.
    pub fn is_selector_error(&self) -> bool {
        matches!(self, PageError::InvalidSelector { .. })
    }
}
