//! Common types shared by the indexer, the navigator and the hosts.

mod content;
mod record;

pub use content::*;
pub use record::*;
