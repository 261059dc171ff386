//! Mutation and navigation watchers.
//!
//! Three independent watchers keep the index current:
//!
//! - container mutations with added nodes feed a trailing-edge debouncer
//!   that rescans;
//! - the page URL is polled at a fixed interval;
//! - host navigation events schedule a URL check shortly after they fire.
//!
//! A URL different from the session URL resets the session and schedules a
//! delayed rescan so the new chat can render first.

use chatnav_protocols::NavigationEvent;
use chatnav_runloop::{Debouncer, spawn_delayed, spawn_interval};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::IndexerError;
use crate::indexer::PageIndexer;

/// Running watchers. Cancelling or dropping the handle stops all of them.
pub struct WatchHandle {
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
    observing_mutations: bool,
}

impl WatchHandle {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether a chat container was found and is being observed.
    pub fn is_observing_mutations(&self) -> bool {
        self.observing_mutations
    }

    /// Cancel and wait for the watcher tasks to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                debug!("Watcher task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl PageIndexer {
    /// Wait the initial settle delay, scan once, then start the watchers.
    pub async fn start(&self) -> Result<WatchHandle, IndexerError> {
        tokio::select! {
            _ = self.shutdown_token().cancelled() => return Err(IndexerError::Stopped),
            _ = tokio::time::sleep(self.timing().initial_scan_delay()) => {}
        }

        let report = self.scan().await?;
        info!("Initial scan indexed {} message(s)", report.added);
        self.start_watchers().await
    }

    /// Start the mutation, URL-poll and navigation watchers.
    ///
    /// A missing chat container only disables the mutation watcher.
    pub async fn start_watchers(&self) -> Result<WatchHandle, IndexerError> {
        let cancel = self.shutdown_token().child_token();
        let mut tasks = Vec::with_capacity(3);

        let observing_mutations = match self.watch_mutations(cancel.clone()).await {
            Ok(task) => {
                tasks.push(task);
                true
            }
            Err(IndexerError::ContainerNotFound(selector)) => {
                warn!("Chat container not found ({}), new messages need a manual rescan", selector);
                false
            }
            Err(e) => return Err(e),
        };

        tasks.push(self.watch_url(cancel.clone()));
        tasks.push(self.watch_navigations(cancel.clone()));

        debug!("Watchers started for {}", self.site_name());
        Ok(WatchHandle {
            cancel,
            tasks,
            observing_mutations,
        })
    }

    async fn watch_mutations(
        &self,
        cancel: CancellationToken,
    ) -> Result<JoinHandle<()>, IndexerError> {
        let page = self.page().clone();
        let selector = self.profile().container.clone();
        let container = match page.query_first(&selector).await {
            Ok(Some(container)) => container,
            Ok(None) => return Err(IndexerError::ContainerNotFound(selector)),
            Err(e) if e.is_selector_error() => return Err(IndexerError::ContainerNotFound(selector)),
            Err(e) => return Err(e.into()),
        };
        let mut batches = page.observe_mutations(container).await?;

        let indexer = self.clone();
        let timing = self.timing();
        let debouncer = Debouncer::spawn_with_token(
            timing.debounce(),
            timing.debounce_max_wait(),
            cancel.clone(),
            move || {
                let indexer = indexer.clone();
                async move {
                    if let Err(e) = indexer.scan().await {
                        warn!("Rescan after mutation failed: {}", e);
                    }
                }
            },
        );

        Ok(tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    batch = batches.recv() => match batch {
                        Some(batch) if batch.has_additions() => debouncer.trigger(),
                        Some(_) => {}
                        None => {
                            debug!("Mutation stream closed");
                            break;
                        }
                    },
                }
            }
        }))
    }

    fn watch_url(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let indexer = self.clone();
        let token = cancel.clone();
        spawn_interval("url-poll", self.timing().url_poll_interval(), cancel, move || {
            let indexer = indexer.clone();
            let token = token.clone();
            async move { indexer.on_possible_navigation(&token).await }
        })
    }

    fn watch_navigations(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let mut events = self.page().navigations();
        let indexer = self.clone();
        let delay = self.timing().navigation_check_delay();

        tokio::spawn(async move {
            loop {
                let event: Option<NavigationEvent> = tokio::select! {
                    _ = cancel.cancelled() => break,
                    received = events.recv() => match received {
                        Ok(event) => Some(event),
                        Err(RecvError::Lagged(skipped)) => {
                            debug!("Missed {} navigation event(s)", skipped);
                            None
                        }
                        Err(RecvError::Closed) => break,
                    },
                };
                if let Some(event) = &event {
                    debug!("Navigation ({:?}) to {}", event.kind, event.url);
                }

                let indexer = indexer.clone();
                let token = cancel.clone();
                spawn_delayed(delay, cancel.clone(), async move {
                    indexer.on_possible_navigation(&token).await;
                });
            }
        })
    }

    /// Reset on URL change and schedule the rescan of the new chat.
    async fn on_possible_navigation(&self, cancel: &CancellationToken) {
        match self.check_url().await {
            Ok(true) => {
                let indexer = self.clone();
                spawn_delayed(self.timing().reset_rescan_delay(), cancel.clone(), async move {
                    if let Err(e) = indexer.scan().await {
                        warn!("Rescan after chat change failed: {}", e);
                    }
                });
            }
            Ok(false) => {}
            Err(e) => warn!("URL check failed: {}", e),
        }
    }
}
