//! Scroll-to with the load-older-history retry.

use chatnav_protocols::{ElementHandle, MessageId};
use chatnav_runloop::spawn_delayed;
use tracing::{debug, info, warn};

use crate::error::IndexerError;
use crate::indexer::PageIndexer;

/// How a scroll-to request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// The element was in the page and was revealed at once.
    Immediate,
    /// The element appeared after loading older history and rescanning.
    AfterRetry,
    /// Still absent after the retry. Not an error.
    Missing,
}

impl ScrollOutcome {
    pub fn is_found(&self) -> bool {
        !matches!(self, ScrollOutcome::Missing)
    }
}

impl PageIndexer {
    /// Scroll the page to message `id`, loading older history once if needed.
    pub async fn scroll_to(&self, id: MessageId) -> Result<ScrollOutcome, IndexerError> {
        let generation = self.generation().await;
        if self.reveal_if_present(id).await? {
            return Ok(ScrollOutcome::Immediate);
        }
        self.retry_after_load(id, generation).await
    }

    /// Reveal `id` if its element is in the page. Returns whether it was.
    pub(crate) async fn reveal_if_present(&self, id: MessageId) -> Result<bool, IndexerError> {
        match self.inner.page.lookup(id).await? {
            Some(element) => {
                self.reveal(element).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Scroll to the top, let the host load, rescan and look up once more.
    ///
    /// `generation` is the session the id belongs to. If the chat changes
    /// meanwhile, the id means nothing in the new session and the retry
    /// gives up as [`ScrollOutcome::Missing`].
    pub(crate) async fn retry_after_load(
        &self,
        id: MessageId,
        generation: u64,
    ) -> Result<ScrollOutcome, IndexerError> {
        let page = &self.inner.page;
        page.scroll_to_top().await?;

        tokio::select! {
            _ = self.shutdown_token().cancelled() => return Err(IndexerError::Stopped),
            _ = tokio::time::sleep(self.inner.timing.scroll_settle()) => {}
        }

        if self.generation().await != generation {
            info!("Chat changed while loading history, dropping scroll to {}", id);
            return Ok(ScrollOutcome::Missing);
        }
        self.scan().await?;
        if self.generation().await != generation {
            info!("Chat changed while rescanning, dropping scroll to {}", id);
            return Ok(ScrollOutcome::Missing);
        }
        match page.lookup(id).await? {
            Some(element) => {
                self.reveal(element).await?;
                debug!("Message {} found after loading history", id);
                Ok(ScrollOutcome::AfterRetry)
            }
            None => {
                warn!("Message {} still not found after loading", id);
                Ok(ScrollOutcome::Missing)
            }
        }
    }

    /// Center `element` and highlight it for a while.
    async fn reveal(&self, element: ElementHandle) -> Result<(), IndexerError> {
        let page = self.inner.page.clone();
        page.scroll_into_view(element).await?;
        page.set_highlight(element, true).await?;

        spawn_delayed(
            self.inner.timing.highlight(),
            self.shutdown_token().child_token(),
            async move {
                if let Err(e) = page.set_highlight(element, false).await {
                    debug!("Could not clear highlight on {}: {}", element.0, e);
                }
            },
        );
        Ok(())
    }
}
