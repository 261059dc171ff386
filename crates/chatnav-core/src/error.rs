//! Indexer errors.

use chatnav_protocols::PageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    /// A host failure other than a rejected selector.
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("Chat container not found: {0}")]
    ContainerNotFound(String),

    #[error("Indexer stopped")]
    Stopped,
}
