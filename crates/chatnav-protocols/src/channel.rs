//! Navigator → indexer channel.
//!
//! The transport is out of scope; it only has to deliver one response per
//! request or fail. Implementations must never block the caller indefinitely.

use async_trait::async_trait;

use crate::error::ChannelError;
use crate::message::{MessagesResponse, RescanResponse, Request, Response, ScrollResponse};
use crate::types::MessageId;

/// Asynchronous request/response channel to a page indexer.
#[async_trait]
pub trait IndexerChannel: Send + Sync {
    /// Send one request and wait for its response.
    async fn request(&self, request: Request) -> Result<Response, ChannelError>;

    async fn get_messages(&self) -> Result<MessagesResponse, ChannelError> {
        self.request(Request::GetMessages).await?.into_messages()
    }

    async fn scroll_to(&self, id: MessageId) -> Result<ScrollResponse, ChannelError> {
        self.request(Request::ScrollToMsg { id }).await?.into_scroll()
    }

    async fn rescan(&self) -> Result<RescanResponse, ChannelError> {
        self.request(Request::Rescan).await?.into_rescan()
    }
}
