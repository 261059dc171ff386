//! Wire messages exchanged between a navigator and an indexer.
//!
//! Requests carry a `type` discriminator; responses are plain objects whose
//! shape identifies them. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::error::ChannelError;
use crate::types::{MessageId, MessageRecord};

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// A navigator → indexer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Fetch the full index, newest first.
    GetMessages,
    /// Scroll the live page to the element tagged with `id`.
    ScrollToMsg { id: MessageId },
    /// Scan immediately, bypassing the mutation debounce.
    Rescan,
}

impl Request {
    /// Wire name of the request type.
    pub fn kind(&self) -> &'static str {
        match self {
            Request::GetMessages => "GET_MESSAGES",
            Request::ScrollToMsg { .. } => "SCROLL_TO_MSG",
            Request::Rescan => "RESCAN",
        }
    }
}

/// Reply to [`Request::GetMessages`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesResponse {
    /// Snapshot of the index, newest first.
    pub messages: Vec<MessageRecord>,
    pub site_name: String,
    pub total_indexed: usize,
}

/// Reply to [`Request::ScrollToMsg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollResponse {
    pub success: bool,
    /// The element was present in the DOM when the request arrived.
    pub found: bool,
    /// The element was absent and the load-and-retry path was started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
}

impl ScrollResponse {
    pub fn found() -> Self {
        Self {
            success: true,
            found: true,
            loading: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            success: true,
            found: false,
            loading: Some(true),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.unwrap_or(false)
    }
}

/// Reply to [`Request::Rescan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescanResponse {
    pub success: bool,
    pub message_count: usize,
}

/// Any indexer reply. Exactly one response is produced per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Messages(MessagesResponse),
    Scroll(ScrollResponse),
    Rescan(RescanResponse),
}

impl Response {
    pub fn into_messages(self) -> Result<MessagesResponse, ChannelError> {
        match self {
            Response::Messages(r) => Ok(r),
            other => Err(other.unexpected("GET_MESSAGES")),
        }
    }

    pub fn into_scroll(self) -> Result<ScrollResponse, ChannelError> {
        match self {
            Response::Scroll(r) => Ok(r),
            other => Err(other.unexpected("SCROLL_TO_MSG")),
        }
    }

    pub fn into_rescan(self) -> Result<RescanResponse, ChannelError> {
        match self {
            Response::Rescan(r) => Ok(r),
            other => Err(other.unexpected("RESCAN")),
        }
    }

    fn unexpected(&self, request: &str) -> ChannelError {
        let detail = match self {
            Response::Messages(_) => "messages response",
            Response::Scroll(_) => "scroll response",
            Response::Rescan(_) => "rescan response",
        };
        ChannelError::UnexpectedResponse {
            request: request.to_string(),
            detail: detail.to_string(),
        }
    }
}
