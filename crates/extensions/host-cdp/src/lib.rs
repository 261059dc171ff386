//! Chrome DevTools Protocol host for chatnav.
//!
//! Attaches to an already open chat tab in a Chrome/Chromium instance started
//! with remote debugging and exposes it as a [`chatnav_protocols::HostPage`].
//!
//! ## Usage
//!
//! 1. Start Chrome with remote debugging:
//!    ```bash
//!    chrome --remote-debugging-port=9222
//!    ```
//!
//! 2. Attach to a chat tab:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://127.0.0.1:9222").await?;
//!    let pages = client.list_pages().await?;
//!    let target = pick_page(&pages, |url| url.contains("claude.ai")).unwrap();
//!    let page = CdpPage::attach(&client, target).await?;
//!    ```
//!
//! Element handles are allocated page-side: every element a script returns
//! is registered in a `WeakRef` table on `window`, so a handle stays valid for
//! the node's lifetime and reports [`chatnav_protocols::PageError::ElementDetached`]
//! once the host re-renders it.

mod client;
mod error;
mod page;
mod protocol;
mod script;
mod session;

pub use client::{CdpClient, pick_page};
pub use error::CdpError;
pub use page::{CdpPage, PageSignal};
pub use protocol::*;
pub use session::PageSession;
