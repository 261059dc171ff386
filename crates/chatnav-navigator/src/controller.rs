//! The navigator controller.

use std::sync::Arc;

use chatnav_config::NavigatorConfig;
use chatnav_protocols::{
    ChannelError, IndexerChannel, MessageId, MessageRecord, MessagesResponse, RescanResponse,
    ScrollResponse,
};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::format::{badge, count_label, time_ago};
use crate::view::{Entry, Feedback, SelectOutcome, ViewState};

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

pub const JUMPING: &str = "Jumping to message...";
pub const LOADING_OLDER: &str = "Loading older messages... This may take a moment";
pub const CONNECTION_FAILED: &str = "Connection failed. Please refresh the page.";
pub const UNABLE_TO_CONNECT: &str = "Unable to connect. Make sure you're on a supported chat page.";

/// Records whose text contains `query`, case-insensitively, in their
/// original order. A blank query keeps everything.
pub fn filter_records<'a>(records: &'a [MessageRecord], query: &str) -> Vec<&'a MessageRecord> {
    let needle = query.trim().to_lowercase();
    records.iter().filter(|r| r.matches(&needle)).collect()
}

/// Pull-based view of one indexer.
///
/// Holds the last fetched snapshot (newest first) and the current query.
/// Filtering never touches the snapshot.
pub struct NavigatorController {
    channel: Arc<dyn IndexerChannel>,
    config: NavigatorConfig,
    snapshot: Vec<MessageRecord>,
    site_name: Option<String>,
    total_indexed: usize,
    query: String,
    state: ViewState,
}

impl NavigatorController {
    pub fn new(channel: Arc<dyn IndexerChannel>, config: NavigatorConfig) -> Self {
        Self {
            channel,
            config,
            snapshot: Vec::new(),
            site_name: None,
            total_indexed: 0,
            query: String::new(),
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn site_name(&self) -> Option<&str> {
        self.site_name.as_deref()
    }

    /// `"on <site>"` once a fetch succeeded.
    pub fn site_label(&self) -> Option<String> {
        self.site_name.as_ref().map(|name| format!("on {}", name))
    }

    pub fn total_indexed(&self) -> usize {
        self.total_indexed
    }

    /// Full last snapshot, newest first.
    pub fn snapshot(&self) -> &[MessageRecord] {
        &self.snapshot
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Fetch a fresh snapshot and update the view state.
    pub async fn fetch(&mut self) -> &ViewState {
        let result = self.bounded(self.channel.get_messages()).await;
        match result {
            Ok(MessagesResponse {
                messages,
                site_name,
                total_indexed,
            }) => {
                debug!("Fetched {} message(s) from {}", messages.len(), site_name);
                self.state = if messages.is_empty() {
                    ViewState::Empty
                } else {
                    ViewState::Ready
                };
                self.snapshot = messages;
                self.site_name = Some(site_name);
                self.total_indexed = total_indexed;
            }
            Err(e) => {
                warn!("Could not load messages: {}", e);
                self.state = ViewState::Disconnected(UNABLE_TO_CONNECT.to_string());
            }
        }
        &self.state
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Snapshot entries matching the current query, newest first.
    pub fn filtered(&self) -> Vec<&MessageRecord> {
        filter_records(&self.snapshot, &self.query)
    }

    /// Rows for the current view.
    pub fn entries(&self) -> Vec<Entry> {
        let now = Utc::now();
        let view = self.filtered();
        let len = view.len();
        view.into_iter()
            .enumerate()
            .map(|(index, record)| Entry {
                id: record.id,
                badge: badge(len, index),
                text: record.text.clone(),
                age: time_ago(record.discovered_at, now),
            })
            .collect()
    }

    pub fn count_label(&self) -> String {
        count_label(
            self.filtered().len(),
            self.snapshot.len(),
            !self.query.trim().is_empty(),
        )
    }

    /// Ask the indexer to jump to `id` and decide what the user sees.
    pub async fn select(&self, id: MessageId) -> SelectOutcome {
        let result = self.bounded(self.channel.scroll_to(id)).await;
        match result {
            Ok(response) => self.outcome_for(id, response),
            Err(e) => {
                error!("Jump to message {} failed: {}", id, e);
                SelectOutcome {
                    feedback: Some(Feedback::error(CONNECTION_FAILED)),
                    close_after: None,
                }
            }
        }
    }

    fn outcome_for(&self, id: MessageId, response: ScrollResponse) -> SelectOutcome {
        if response.is_loading() {
            info!("Message {} is loading from older history", id);
            SelectOutcome {
                feedback: Some(Feedback::info(LOADING_OLDER)),
                close_after: Some(self.config.close_after_loading()),
            }
        } else if response.found {
            SelectOutcome {
                feedback: Some(Feedback::success(JUMPING)),
                close_after: Some(self.config.close_after_found()),
            }
        } else {
            SelectOutcome {
                feedback: None,
                close_after: Some(self.config.close_after_other()),
            }
        }
    }

    /// Force an immediate scan. Returns the indexer's message count.
    pub async fn rescan(&self) -> Result<usize, ChannelError> {
        let RescanResponse {
            success,
            message_count,
        } = self.bounded(self.channel.rescan()).await?;
        if !success {
            warn!("Indexer reported an unsuccessful rescan");
        }
        Ok(message_count)
    }

    /// Rescan, then fetch. A failed rescan does not prevent the fetch.
    pub async fn refresh(&mut self) -> &ViewState {
        if let Err(e) = self.rescan().await {
            warn!("Rescan failed, continuing anyway: {}", e);
        }
        self.fetch().await
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, ChannelError>>,
    ) -> Result<T, ChannelError> {
        let timeout = self.config.request_timeout();
        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(ChannelError::Timeout(timeout.as_millis() as u64)),
        }
    }
}
