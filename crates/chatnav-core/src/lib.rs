//! # chatnav Core
//!
//! The page indexer: finds user messages on a chat page, tags them with
//! sequential ids, keeps the per-URL index and serves navigator requests.
//!
//! ## Components
//!
//! - [`PageIndexer`] - scan, reset, scroll-to and request dispatch
//! - [`Session`] - the index, id counter and URL of one chat
//! - [`WatchHandle`] - running mutation and navigation watchers
//! - [`LocalChannel`] / [`UnreachableChannel`] - [`IndexerChannel`] ends
//! - [`MemoryPage`] - in-memory host page
//!
//! [`IndexerChannel`]: chatnav_protocols::IndexerChannel

pub mod channel;
pub mod error;
pub mod indexer;
pub mod memory;
pub mod session;
pub mod summary;
pub mod watch;

mod indexer_scroll;
mod scan;

pub use channel::{LocalChannel, UnreachableChannel};
pub use error::IndexerError;
pub use indexer::PageIndexer;
pub use indexer_scroll::ScrollOutcome;
pub use memory::{MemoryPage, PageOp};
pub use scan::ScanReport;
pub use session::Session;
pub use summary::summarize;
pub use watch::WatchHandle;
