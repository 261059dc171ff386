//! Cancellable one-shot delay.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Run `action` after `delay` unless `cancel` fires first.
///
/// The handle resolves to `true` when the action ran.
pub fn spawn_delayed<Fut>(
    delay: Duration,
    cancel: CancellationToken,
    action: Fut,
) -> JoinHandle<bool>
where
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => {
                action.await;
                true
            }
        }
    })
}
