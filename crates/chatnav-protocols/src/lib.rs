//! # chatnav Protocols
//!
//! Shared definitions for the chatnav workspace.
//! Contains only data types and interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`PageDom`] - Read and scroll the host page
//! - [`TaggableStore`] - Element ↔ message id association owned by the indexer
//! - [`PageEvents`] - Structural mutations and navigation notifications
//! - [`IndexerChannel`] - Request/response channel from a navigator to an indexer

pub mod channel;
pub mod error;
pub mod message;
pub mod page;
pub mod types;

pub use channel::IndexerChannel;
pub use error::{ChannelError, PageError};
pub use message::{MessagesResponse, RescanResponse, Request, Response, ScrollResponse};
pub use page::{
    ElementHandle, HostPage, MutationBatch, NavigationEvent, NavigationKind, PageDom,
    PageEvents, TAG_ATTRIBUTE, TaggableStore,
};
pub use types::*;
