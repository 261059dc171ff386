//! The page indexer.

use std::sync::Arc;

use chatnav_config::{Config, ExtractionConfig, SiteProfile, TimingConfig};
use chatnav_protocols::{
    ContentProbe, HostPage, MessageRecord, MessagesResponse, RescanResponse, Request, Response,
    ScrollResponse,
};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::IndexerError;
use crate::scan::{ScanReport, scan_page};
use crate::session::Session;

#[cfg(test)]
#[path = "indexer_tests.rs"]
mod tests;

/// Indexes the user messages of one page and serves navigator requests.
///
/// Cheap to clone; clones share the session. The session lock is held for
/// the whole of a scan or reset, so readers never see a partial update.
#[derive(Clone)]
pub struct PageIndexer {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) page: Arc<dyn HostPage>,
    pub(crate) profile: SiteProfile,
    pub(crate) extraction: ExtractionConfig,
    pub(crate) probe: ContentProbe,
    pub(crate) timing: TimingConfig,
    pub(crate) session: Mutex<Session>,
    pub(crate) shutdown: CancellationToken,
}

impl PageIndexer {
    /// Indexer for whatever page `page` currently shows.
    ///
    /// Returns `None` when no site profile matches the page URL; the page is
    /// then left alone entirely.
    pub async fn for_page(
        page: Arc<dyn HostPage>,
        config: &Config,
    ) -> Result<Option<Self>, IndexerError> {
        let url = page.current_url().await?;
        match config.profile_for_url(&url) {
            Some(profile) => {
                info!("Indexing {} page: {}", profile.name, url);
                Ok(Some(Self::new(page, profile.clone(), config, url)))
            }
            None => {
                warn!("No site profile for {}, indexer disabled", url);
                Ok(None)
            }
        }
    }

    pub fn new(
        page: Arc<dyn HostPage>,
        profile: SiteProfile,
        config: &Config,
        url: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                page,
                profile,
                probe: config.extraction.probe(),
                extraction: config.extraction.clone(),
                timing: config.timing.clone(),
                session: Mutex::new(Session::new(url)),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.inner.profile.name
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.inner.profile
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.inner.timing
    }

    pub fn page(&self) -> &Arc<dyn HostPage> {
        &self.inner.page
    }

    /// Scan the page and append newly found messages.
    ///
    /// Idempotent on an unchanged page.
    pub async fn scan(&self) -> Result<ScanReport, IndexerError> {
        let mut session = self.inner.session.lock().await;
        let report = scan_page(
            self.inner.page.as_ref(),
            &self.inner.profile,
            &self.inner.extraction,
            &self.inner.probe,
            &mut session,
        )
        .await?;

        if report.added > 0 {
            info!(
                "Indexed {} new message(s) via {:?}, {} total",
                report.added,
                report.selector.as_deref().unwrap_or_default(),
                session.len()
            );
        } else {
            debug!("Scan found {} candidate(s), nothing new", report.matched);
        }
        Ok(report)
    }

    /// Copy of the index, newest first.
    pub async fn snapshot(&self) -> Vec<MessageRecord> {
        self.inner.session.lock().await.snapshot()
    }

    pub async fn len(&self) -> usize {
        self.inner.session.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.session.lock().await.is_empty()
    }

    pub async fn session_url(&self) -> String {
        self.inner.session.lock().await.url().to_string()
    }

    /// Session generation; changes whenever the session is reset.
    pub async fn generation(&self) -> u64 {
        self.inner.session.lock().await.generation()
    }

    /// Reset the session if the page URL differs from the session URL.
    ///
    /// Returns whether a reset happened. The caller schedules the rescan.
    pub async fn check_url(&self) -> Result<bool, IndexerError> {
        let url = self.inner.page.current_url().await?;
        let mut session = self.inner.session.lock().await;
        if session.is_current(&url) {
            return Ok(false);
        }

        info!("Chat changed: {} -> {}", session.url(), url);
        let cleared = self.inner.page.clear_tags().await?;
        let dropped = session.reset(url);
        debug!("Session reset: {} record(s) dropped, {} tag(s) cleared", dropped, cleared);
        Ok(true)
    }

    /// Unconditionally start a new session for `url`.
    pub async fn reset(&self, url: impl Into<String>) -> Result<(), IndexerError> {
        let mut session = self.inner.session.lock().await;
        self.inner.page.clear_tags().await?;
        session.reset(url);
        Ok(())
    }

    /// Answer one navigator request.
    ///
    /// Always produces exactly one response. A scroll to an element that is
    /// not in the page starts the load-and-retry path in the background and
    /// answers `loading` right away.
    pub async fn handle(&self, request: Request) -> Response {
        debug!("Handling {}", request.kind());
        match request {
            Request::GetMessages => {
                let session = self.inner.session.lock().await;
                Response::Messages(MessagesResponse {
                    messages: session.snapshot(),
                    site_name: self.site_name().to_string(),
                    total_indexed: session.len(),
                })
            }
            Request::ScrollToMsg { id } => {
                let generation = self.generation().await;
                match self.reveal_if_present(id).await {
                    Ok(true) => Response::Scroll(ScrollResponse::found()),
                    Ok(false) => {
                        info!("Message {} not in page, loading older history", id);
                        let indexer = self.clone();
                        tokio::spawn(async move {
                            if let Err(e) = indexer.retry_after_load(id, generation).await {
                                warn!("Scroll retry for {} failed: {}", id, e);
                            }
                        });
                        Response::Scroll(ScrollResponse::loading())
                    }
                    Err(e) => {
                        warn!("Scroll to {} failed: {}", id, e);
                        Response::Scroll(ScrollResponse {
                            success: false,
                            found: false,
                            loading: None,
                        })
                    }
                }
            }
            Request::Rescan => {
                let success = match self.scan().await {
                    Ok(_) => true,
                    Err(e) => {
                        warn!("Rescan failed: {}", e);
                        false
                    }
                };
                Response::Rescan(RescanResponse {
                    success,
                    message_count: self.len().await,
                })
            }
        }
    }

    /// Stop every watcher, pending timer and channel server of this indexer.
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }

    pub(crate) fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}
