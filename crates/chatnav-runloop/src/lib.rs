//! # chatnav RunLoop
//!
//! Timer primitives shared by the page indexer watchers.
//!
//! - [`Debouncer`]: trailing-edge debounce with cancel-and-reschedule
//!   semantics and an optional maximum wait.
//! - [`spawn_interval`]: periodic action that stops on cancellation.
//! - [`spawn_delayed`]: one-shot delayed action that can be called off.
//!
//! All primitives run on the tokio timer, so tests can drive them with
//! `tokio::time::pause` and `advance`.

mod debounce;
mod delay;
mod interval;

pub use debounce::Debouncer;
pub use delay::spawn_delayed;
pub use interval::spawn_interval;
pub use tokio_util::sync::CancellationToken;
