//! In-memory host page.
//!
//! A scripted stand-in for a browser tab. Selectors are not parsed: every
//! element is registered under the selectors it should match, and a query
//! returns the attached elements registered under exactly that string, in
//! insertion order. Older history can be staged so it only attaches when the
//! page is scrolled to the top, the way chat hosts lazy-load.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chatnav_protocols::{
    ContentProbe, ElementContent, ElementHandle, MessageId, MutationBatch, NavigationEvent,
    NavigationKind, PageDom, PageError, PageEvents, TaggableStore,
};
use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};
use tracing::trace;

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

/// A host call recorded by [`MemoryPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOp {
    Queried(String),
    ScrolledToTop,
    ScrolledIntoView(ElementHandle),
    Highlight(ElementHandle, bool),
    TagsCleared(usize),
}

#[derive(Debug)]
struct Node {
    content: ElementContent,
    tag: Option<MessageId>,
    highlighted: bool,
    attached: bool,
}

#[derive(Debug, Default)]
struct State {
    url: String,
    next_handle: i64,
    nodes: BTreeMap<i64, Node>,
    selectors: HashMap<String, Vec<ElementHandle>>,
    invalid: HashSet<String>,
    staged: Vec<(Vec<String>, ElementHandle)>,
    observers: Vec<mpsc::UnboundedSender<MutationBatch>>,
    journal: Vec<PageOp>,
}

impl State {
    fn create(&mut self, content: ElementContent, attached: bool) -> ElementHandle {
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.nodes.insert(
            handle.0,
            Node {
                content,
                tag: None,
                highlighted: false,
                attached,
            },
        );
        handle
    }

    fn register(&mut self, selectors: &[String], handle: ElementHandle, front: bool) {
        for selector in selectors {
            let list = self.selectors.entry(selector.clone()).or_default();
            if front {
                list.insert(0, handle);
            } else {
                list.push(handle);
            }
        }
    }

    fn attached(&self, handle: ElementHandle) -> Result<&Node, PageError> {
        match self.nodes.get(&handle.0) {
            Some(node) if node.attached => Ok(node),
            _ => Err(PageError::ElementDetached(handle.0)),
        }
    }

    fn attached_mut(&mut self, handle: ElementHandle) -> Result<&mut Node, PageError> {
        match self.nodes.get_mut(&handle.0) {
            Some(node) if node.attached => Ok(node),
            _ => Err(PageError::ElementDetached(handle.0)),
        }
    }

    fn notify(&mut self, batch: MutationBatch) {
        self.observers.retain(|tx| tx.send(batch).is_ok());
    }
}

/// Scriptable in-memory [`HostPage`](chatnav_protocols::HostPage).
pub struct MemoryPage {
    state: Mutex<State>,
    navigations: broadcast::Sender<NavigationEvent>,
    connected: Mutex<bool>,
}

impl MemoryPage {
    pub fn new(url: impl Into<String>) -> Self {
        let (navigations, _) = broadcast::channel(16);
        Self {
            state: Mutex::new(State {
                url: url.into(),
                ..Default::default()
            }),
            navigations,
            connected: Mutex::new(true),
        }
    }

    /// Add an attached, contentless element (e.g. the chat container).
    pub fn add_container(&self, selector: &str) -> ElementHandle {
        let mut state = self.state.lock();
        let handle = state.create(ElementContent::default(), true);
        state.register(&[selector.to_string()], handle, false);
        handle
    }

    /// Append an element matching `selectors` and notify observers.
    pub fn insert(&self, selectors: &[&str], content: ElementContent) -> ElementHandle {
        let selectors = owned(selectors);
        let mut state = self.state.lock();
        let handle = state.create(content, true);
        state.register(&selectors, handle, false);
        state.notify(MutationBatch::added(1));
        handle
    }

    /// Prepare an older element that attaches, ahead of everything already
    /// present, on the next [`scroll_to_top`](PageDom::scroll_to_top).
    pub fn stage_history(&self, selectors: &[&str], content: ElementContent) -> ElementHandle {
        let mut state = self.state.lock();
        let handle = state.create(content, false);
        state.staged.push((owned(selectors), handle));
        handle
    }

    /// Bring a detached element back, tag included, on the next
    /// [`scroll_to_top`](PageDom::scroll_to_top).
    pub fn restore_on_scroll(&self, handle: ElementHandle, selectors: &[&str]) {
        self.state.lock().staged.push((owned(selectors), handle));
    }

    /// Remove an element from the page, keeping whatever tag it had.
    pub fn detach(&self, handle: ElementHandle) {
        let mut state = self.state.lock();
        if let Some(node) = state.nodes.get_mut(&handle.0) {
            node.attached = false;
        }
        for list in state.selectors.values_mut() {
            list.retain(|h| *h != handle);
        }
        state.notify(MutationBatch {
            added_nodes: 0,
            removed_nodes: 1,
        });
    }

    /// Make queries for `selector` fail as unsupported syntax.
    pub fn mark_invalid(&self, selector: &str) {
        self.state.lock().invalid.insert(selector.to_string());
    }

    /// Change the URL without any navigation event, like a host-side
    /// change only the poller can notice.
    pub fn set_url(&self, url: impl Into<String>) {
        self.state.lock().url = url.into();
    }

    /// Change the URL through history push and emit the event.
    pub fn push_url(&self, url: impl Into<String>) {
        self.navigate(NavigationKind::Push, url.into());
    }

    /// Change the URL through history replace and emit the event.
    pub fn replace_url(&self, url: impl Into<String>) {
        self.navigate(NavigationKind::Replace, url.into());
    }

    fn navigate(&self, kind: NavigationKind, url: String) {
        self.state.lock().url = url.clone();
        // No subscriber is fine.
        let _ = self.navigations.send(NavigationEvent::new(kind, url));
    }

    /// Simulate the page going away. Every host call then fails.
    pub fn disconnect(&self) {
        *self.connected.lock() = false;
    }

    pub fn tag_of(&self, handle: ElementHandle) -> Option<MessageId> {
        self.state.lock().nodes.get(&handle.0).and_then(|n| n.tag)
    }

    pub fn is_highlighted(&self, handle: ElementHandle) -> bool {
        self.state
            .lock()
            .nodes
            .get(&handle.0)
            .map(|n| n.highlighted)
            .unwrap_or(false)
    }

    /// Host calls recorded so far.
    pub fn journal(&self) -> Vec<PageOp> {
        self.state.lock().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.state.lock().journal.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    fn ensure_connected(&self) -> Result<(), PageError> {
        if *self.connected.lock() {
            Ok(())
        } else {
            Err(PageError::Disconnected)
        }
    }
}

fn owned(selectors: &[&str]) -> Vec<String> {
    selectors.iter().map(|s| s.to_string()).collect()
}

#[async_trait]
impl PageDom for MemoryPage {
    async fn current_url(&self) -> Result<String, PageError> {
        self.ensure_connected()?;
        Ok(self.state.lock().url.clone())
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError> {
        self.ensure_connected()?;
        let mut state = self.state.lock();
        state.journal.push(PageOp::Queried(selector.to_string()));
        if state.invalid.contains(selector) {
            return Err(PageError::InvalidSelector {
                selector: selector.to_string(),
                reason: "unsupported selector".to_string(),
            });
        }
        Ok(state.selectors.get(selector).cloned().unwrap_or_default())
    }

    async fn read_content(
        &self,
        element: ElementHandle,
        _probe: &ContentProbe,
    ) -> Result<ElementContent, PageError> {
        self.ensure_connected()?;
        Ok(self.state.lock().attached(element)?.content.clone())
    }

    async fn scroll_into_view(&self, element: ElementHandle) -> Result<(), PageError> {
        self.ensure_connected()?;
        let mut state = self.state.lock();
        state.attached(element)?;
        state.journal.push(PageOp::ScrolledIntoView(element));
        Ok(())
    }

    async fn set_highlight(&self, element: ElementHandle, on: bool) -> Result<(), PageError> {
        self.ensure_connected()?;
        let mut state = self.state.lock();
        state.attached_mut(element)?.highlighted = on;
        state.journal.push(PageOp::Highlight(element, on));
        Ok(())
    }

    async fn scroll_to_top(&self) -> Result<(), PageError> {
        self.ensure_connected()?;
        let mut state = self.state.lock();
        state.journal.push(PageOp::ScrolledToTop);

        let staged = std::mem::take(&mut state.staged);
        if staged.is_empty() {
            return Ok(());
        }
        let count = staged.len();
        // Oldest staged first in the document, ahead of current content.
        for (selectors, handle) in staged.into_iter().rev() {
            if let Some(node) = state.nodes.get_mut(&handle.0) {
                node.attached = true;
            }
            state.register(&selectors, handle, true);
        }
        trace!("Attached {} staged element(s)", count);
        state.notify(MutationBatch::added(count));
        Ok(())
    }
}

#[async_trait]
impl TaggableStore for MemoryPage {
    async fn tag(&self, element: ElementHandle, id: MessageId) -> Result<(), PageError> {
        self.ensure_connected()?;
        let mut state = self.state.lock();
        let node = state.attached_mut(element)?;
        if let Some(existing) = node.tag {
            return Err(PageError::AlreadyTagged {
                element: element.0,
                existing,
            });
        }
        node.tag = Some(id);
        Ok(())
    }

    async fn lookup(&self, id: MessageId) -> Result<Option<ElementHandle>, PageError> {
        self.ensure_connected()?;
        let state = self.state.lock();
        Ok(state
            .nodes
            .iter()
            .find(|(_, node)| node.attached && node.tag == Some(id))
            .map(|(handle, _)| ElementHandle(*handle)))
    }

    async fn is_tagged(&self, element: ElementHandle) -> Result<bool, PageError> {
        self.ensure_connected()?;
        Ok(self.state.lock().attached(element)?.tag.is_some())
    }

    async fn clear_tags(&self) -> Result<usize, PageError> {
        self.ensure_connected()?;
        let mut state = self.state.lock();
        let mut cleared = 0;
        // Detached nodes too: they may be re-attached under a later session.
        for node in state.nodes.values_mut() {
            if node.tag.take().is_some() {
                cleared += 1;
            }
        }
        state.journal.push(PageOp::TagsCleared(cleared));
        Ok(cleared)
    }
}

#[async_trait]
impl PageEvents for MemoryPage {
    async fn observe_mutations(
        &self,
        container: ElementHandle,
    ) -> Result<mpsc::UnboundedReceiver<MutationBatch>, PageError> {
        self.ensure_connected()?;
        let mut state = self.state.lock();
        state.attached(container)?;
        let (tx, rx) = mpsc::unbounded_channel();
        state.observers.push(tx);
        Ok(rx)
    }

    fn navigations(&self) -> broadcast::Receiver<NavigationEvent> {
        self.navigations.subscribe()
    }
}
