//! Channel ends for talking to a [`PageIndexer`].

use std::time::Duration;

use async_trait::async_trait;
use chatnav_protocols::{ChannelError, IndexerChannel, Request, Response};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::indexer::PageIndexer;

struct Envelope {
    request: Request,
    reply: oneshot::Sender<Response>,
}

/// In-process channel to an indexer task.
///
/// Requests are served one at a time in arrival order. Each round trip is
/// bounded by the timeout, so a stalled indexer surfaces as
/// [`ChannelError::Timeout`] rather than a hang.
#[derive(Clone)]
pub struct LocalChannel {
    tx: mpsc::Sender<Envelope>,
    timeout: Duration,
}

impl LocalChannel {
    /// Spawn the serving task for `indexer`.
    ///
    /// The task ends when every channel clone is dropped or the indexer
    /// shuts down.
    pub fn serve(indexer: PageIndexer, timeout: Duration) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<Envelope>(32);
        let shutdown = indexer.shutdown_token().clone();

        let task = tokio::spawn(async move {
            loop {
                let envelope = tokio::select! {
                    _ = shutdown.cancelled() => break,
                    envelope = rx.recv() => match envelope {
                        Some(envelope) => envelope,
                        None => break,
                    },
                };
                let response = indexer.handle(envelope.request).await;
                if envelope.reply.send(response).is_err() {
                    debug!("Requester went away before the reply");
                }
            }
            debug!("Indexer channel closed");
        });

        (Self { tx, timeout }, task)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl IndexerChannel for LocalChannel {
    async fn request(&self, request: Request) -> Result<Response, ChannelError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| ChannelError::Closed)?;

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(ChannelError::Closed),
            Err(_) => Err(ChannelError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

/// Channel for a page that has no indexer (unsupported site, page not
/// loaded). Every request fails with [`ChannelError::Unreachable`].
#[derive(Debug, Clone)]
pub struct UnreachableChannel {
    reason: String,
}

impl UnreachableChannel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl IndexerChannel for UnreachableChannel {
    async fn request(&self, _request: Request) -> Result<Response, ChannelError> {
        Err(ChannelError::Unreachable(self.reason.clone()))
    }
}
