//! Host page capabilities.
//!
//! The indexer never touches a DOM directly. A host (an in-memory page, a
//! browser reached over CDP, ...) implements these traits and the indexing
//! algorithm runs unchanged on top of any of them.
//!
//! ## Capabilities
//!
//! - [`PageDom`]: selector queries, element content, scrolling, highlight
//! - [`TaggableStore`]: the element ↔ message id association
//! - [`PageEvents`]: structural mutations of the chat container and
//!   in-document navigations (history push/replace)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};

use crate::error::PageError;
use crate::types::{ContentProbe, ElementContent, MessageId};

/// DOM attribute used to tag indexed elements. Owned exclusively by the indexer.
pub const TAG_ATTRIBUTE: &str = "data-chat-nav-id";

/// Opaque host-side reference to one element.
///
/// Stable for the lifetime of the underlying node (CDP backend node id, or an
/// arena index for in-memory pages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(pub i64);

/// One batch of child-list mutations observed under the chat container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationBatch {
    pub added_nodes: usize,
    #[serde(default)]
    pub removed_nodes: usize,
}

impl MutationBatch {
    pub fn added(count: usize) -> Self {
        Self {
            added_nodes: count,
            removed_nodes: 0,
        }
    }

    /// Only additions can bring new messages into view.
    pub fn has_additions(&self) -> bool {
        self.added_nodes > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationKind {
    /// `history.pushState` or equivalent.
    Push,
    /// `history.replaceState` or equivalent.
    Replace,
    /// A full document navigation.
    Document,
}

/// Notification that the page URL may have changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub kind: NavigationKind,
    pub url: String,
}

impl NavigationEvent {
    pub fn new(kind: NavigationKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
        }
    }
}

/// Read and scroll access to the host page.
#[async_trait]
pub trait PageDom: Send + Sync {
    /// Current full URL of the page.
    async fn current_url(&self) -> Result<String, PageError>;

    /// All elements matching `selector`, in document order.
    ///
    /// Hosts return [`PageError::InvalidSelector`] for selectors they cannot
    /// evaluate.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError>;

    /// First element matching `selector`.
    async fn query_first(&self, selector: &str) -> Result<Option<ElementHandle>, PageError> {
        Ok(self.query_all(selector).await?.into_iter().next())
    }

    /// Raw content facts of one element.
    async fn read_content(
        &self,
        element: ElementHandle,
        probe: &ContentProbe,
    ) -> Result<ElementContent, PageError>;

    /// Smoothly scroll `element` to the vertical center of the viewport.
    async fn scroll_into_view(&self, element: ElementHandle) -> Result<(), PageError>;

    /// Add or remove the transient highlight on `element`.
    async fn set_highlight(&self, element: ElementHandle, on: bool) -> Result<(), PageError>;

    /// Scroll the viewport to the top so the host lazy-loads older history.
    async fn scroll_to_top(&self) -> Result<(), PageError>;
}

/// Element ↔ message id association living on the page itself.
///
/// An element carries at most one tag; tagging a tagged element fails with
/// [`PageError::AlreadyTagged`].
#[async_trait]
pub trait TaggableStore: Send + Sync {
    async fn tag(&self, element: ElementHandle, id: MessageId) -> Result<(), PageError>;

    /// Element currently tagged with `id`, if it is materialized in the DOM.
    async fn lookup(&self, id: MessageId) -> Result<Option<ElementHandle>, PageError>;

    async fn is_tagged(&self, element: ElementHandle) -> Result<bool, PageError>;

    /// Remove every tag. Returns how many were removed.
    async fn clear_tags(&self) -> Result<usize, PageError>;
}

/// Change notifications provided by the host.
#[async_trait]
pub trait PageEvents: Send + Sync {
    /// Start observing child-list changes in the subtree of `container`.
    async fn observe_mutations(
        &self,
        container: ElementHandle,
    ) -> Result<mpsc::UnboundedReceiver<MutationBatch>, PageError>;

    /// Subscribe to in-document and document navigations.
    fn navigations(&self) -> broadcast::Receiver<NavigationEvent>;
}

/// Everything the indexer needs from a host.
pub trait HostPage: PageDom + TaggableStore + PageEvents {}

impl<T: PageDom + TaggableStore + PageEvents + ?Sized> HostPage for T {}
