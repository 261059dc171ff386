//! Error types for the chatnav protocol layer.

mod channel;
mod page;

pub use channel::*;
pub use page::*;
