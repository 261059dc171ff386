//! Trailing-edge debouncer.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Runs an action once a burst of triggers has gone quiet for `window`.
///
/// Every [`trigger`](Self::trigger) restarts the window. When `max_wait` is
/// set, a burst that keeps re-triggering still fires no later than
/// `max_wait` after its first trigger. The action never runs concurrently
/// with itself; triggers that arrive while it runs start a new burst.
pub struct Debouncer {
    window: Duration,
    max_wait: Option<Duration>,
    tx: mpsc::UnboundedSender<()>,
    cancel: CancellationToken,
    fire_count: Arc<AtomicU64>,
}

impl Debouncer {
    /// Spawn the debounce task on the current runtime.
    pub fn spawn<F, Fut>(window: Duration, max_wait: Option<Duration>, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn_with_token(window, max_wait, CancellationToken::new(), action)
    }

    /// Like [`spawn`](Self::spawn), also stopping when `cancel` fires.
    /// Cancelling or dropping the debouncer leaves `cancel` untouched.
    pub fn spawn_with_token<F, Fut>(
        window: Duration,
        max_wait: Option<Duration>,
        cancel: CancellationToken,
        action: F,
    ) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = cancel.child_token();
        let (tx, rx) = mpsc::unbounded_channel();
        let fire_count = Arc::new(AtomicU64::new(0));

        tokio::spawn(run(
            window,
            max_wait,
            rx,
            cancel.clone(),
            fire_count.clone(),
            action,
        ));

        Self {
            window,
            max_wait,
            tx,
            cancel,
            fire_count,
        }
    }

    /// Schedule the action, pushing back any pending run.
    pub fn trigger(&self) {
        if self.tx.send(()).is_err() {
            trace!("Debouncer already stopped, trigger ignored");
        }
    }

    /// Drop any pending run and stop the task.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// How many times the action has completed.
    pub fn fire_count(&self) -> u64 {
        self.fire_count.load(Ordering::Relaxed)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run<F, Fut>(
    window: Duration,
    max_wait: Option<Duration>,
    mut rx: mpsc::UnboundedReceiver<()>,
    cancel: CancellationToken,
    fire_count: Arc<AtomicU64>,
    action: F,
) where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            msg = rx.recv() => {
                if msg.is_none() {
                    break;
                }
            }
        }

        let burst_start = Instant::now();
        let ceiling = max_wait.map(|max| burst_start + max);
        let mut deadline = clamp(burst_start + window, ceiling);
        let mut closed = false;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Debouncer cancelled with a pending run");
                    return;
                }
                _ = sleep_until(deadline) => break,
                msg = rx.recv(), if !closed => match msg {
                    Some(()) => deadline = clamp(Instant::now() + window, ceiling),
                    None => closed = true,
                },
            }
        }

        action().await;
        fire_count.fetch_add(1, Ordering::Relaxed);

        if closed {
            break;
        }
    }
}

fn clamp(deadline: Instant, ceiling: Option<Instant>) -> Instant {
    match ceiling {
        Some(ceiling) if ceiling < deadline => ceiling,
        _ => deadline,
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
