//! Cancellable periodic ticker.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Run `tick` every `period` until `cancel` fires.
///
/// The first tick happens one full `period` after spawning. A slow tick
/// delays the following ones instead of bursting to catch up, and ticks
/// never overlap. A zero `period` is raised to one millisecond.
pub fn spawn_interval<F, Fut>(
    name: &'static str,
    period: Duration,
    cancel: CancellationToken,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let period = if period.is_zero() {
        warn!("Interval {} has a zero period, using {:?}", name, MIN_PERIOD);
        MIN_PERIOD
    } else {
        period
    };

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Interval {} stopped", name);
                    break;
                }
                _ = ticker.tick() => tick().await,
            }
        }
    })
}
