//! # chatnav Navigator
//!
//! Client side of the indexer channel. Pulls index snapshots, filters them
//! locally, and turns jump and rescan replies into view state and user
//! feedback.
//!
//! - [`NavigatorController`] - fetch, filter, select, rescan, refresh
//! - [`ViewState`] - what the list surface should show
//! - [`SelectOutcome`] - feedback and close delay after a jump
//! - [`format`] - count labels, badges and relative times

pub mod controller;
pub mod format;
pub mod view;

pub use controller::{NavigatorController, filter_records};
pub use view::{Entry, Feedback, FeedbackKind, SelectOutcome, ViewState};
