//! Channel errors.

use thiserror::Error;

/// Failures of the navigator → indexer request channel.
///
/// Every variant means the caller did not get an answer from a live indexer;
/// none of them is ever equivalent to "zero messages".
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Indexer unreachable: {0}")]
    Unreachable(String),

    #[error("Channel closed")]
    Closed,

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Unexpected response to {request}: {detail}")]
    UnexpectedResponse { request: String, detail: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
