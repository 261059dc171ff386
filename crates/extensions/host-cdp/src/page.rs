//! [`HostPage`](chatnav_protocols::HostPage) implementation over a CDP session.

use std::sync::Arc;

use async_trait::async_trait;
use chatnav_protocols::{
    ContentProbe, ElementContent, ElementHandle, MessageId, MutationBatch, NavigationEvent,
    NavigationKind, PageDom, PageError, PageEvents, TAG_ATTRIBUTE, TaggableStore,
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::client::CdpClient;
use crate::error::CdpError;
use crate::protocol::{
    BindingCalled, CdpResponse, FrameNavigated, NavigatedWithinDocument, PageInfo, ScriptReply,
};
use crate::script::{self, HIGHLIGHT_CLASS, MUTATION_BINDING};
use crate::session::PageSession;

const NAVIGATION_CAPACITY: usize = 64;

type Subscribers = Arc<Mutex<Vec<mpsc::UnboundedSender<MutationBatch>>>>;

/// Host-relevant meaning of one CDP event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSignal {
    Mutation(MutationBatch),
    Navigation(NavigationEvent),
}

impl PageSignal {
    /// Translate a raw event. Sub-frame navigations and foreign bindings are
    /// not signals.
    pub fn from_event(event: &CdpResponse, main_frame: &str) -> Option<Self> {
        let params = event.params.clone()?;
        match event.method.as_deref()? {
            "Runtime.bindingCalled" => {
                let call: BindingCalled = serde_json::from_value(params).ok()?;
                if call.name != MUTATION_BINDING {
                    return None;
                }
                serde_json::from_str(&call.payload).ok().map(PageSignal::Mutation)
            }
            "Page.navigatedWithinDocument" => {
                let nav: NavigatedWithinDocument = serde_json::from_value(params).ok()?;
                (nav.frame_id == main_frame).then(|| {
                    PageSignal::Navigation(NavigationEvent::new(NavigationKind::Push, nav.url))
                })
            }
            "Page.frameNavigated" => {
                let nav: FrameNavigated = serde_json::from_value(params).ok()?;
                if nav.frame.parent_id.is_some() {
                    return None;
                }
                Some(PageSignal::Navigation(NavigationEvent::new(
                    NavigationKind::Document,
                    nav.frame.url,
                )))
            }
            _ => None,
        }
    }
}

/// Unwrap a script envelope into its value.
pub(crate) fn reply_value(
    reply: ScriptReply,
    element: Option<ElementHandle>,
) -> Result<Value, PageError> {
    let element_id = element.map(|e| e.0).unwrap_or_default();
    if reply.detached {
        return Err(PageError::ElementDetached(element_id));
    }
    match reply.error.as_deref() {
        None => Ok(reply.value),
        Some("tagged") => {
            let reason = reply.reason.unwrap_or_default();
            match reason.trim().parse::<u64>() {
                Ok(existing) => Err(PageError::AlreadyTagged {
                    element: element_id,
                    existing: MessageId(existing),
                }),
                Err(_) => Err(PageError::Host(format!(
                    "element {} carries a foreign tag '{}'",
                    element_id, reason
                ))),
            }
        }
        Some(kind) => Err(PageError::Host(format!(
            "{}: {}",
            kind,
            reply.reason.unwrap_or_default()
        ))),
    }
}

fn unexpected(what: &str, value: &Value) -> PageError {
    PageError::Host(format!("unexpected {} reply: {}", what, value))
}

/// A live chat tab.
pub struct CdpPage {
    session: PageSession,
    target_url: String,
    nav_tx: broadcast::Sender<NavigationEvent>,
    subscribers: Subscribers,
    pump: JoinHandle<()>,
}

impl CdpPage {
    /// Attach to `target`, install the mutation binding and start routing events.
    pub async fn attach(client: &CdpClient, target: &PageInfo) -> Result<Self, CdpError> {
        let (session, events) = client.attach_page(&target.id).await?;
        session.add_binding(MUTATION_BINDING).await?;
        let main_frame = session.main_frame_id().await?;

        let (nav_tx, _) = broadcast::channel(NAVIGATION_CAPACITY);
        let subscribers: Subscribers = Arc::new(Mutex::new(Vec::new()));
        let pump = tokio::spawn(pump_events(
            events,
            main_frame,
            nav_tx.clone(),
            subscribers.clone(),
        ));

        info!("Attached to tab {} ({})", target.id, target.url);

        Ok(Self {
            session,
            target_url: target.url.clone(),
            nav_tx,
            subscribers,
            pump,
        })
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    /// URL the tab had when it was attached.
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    async fn run(&self, body: &str, args: Value) -> Result<ScriptReply, PageError> {
        let value = self.session.evaluate(&script::build(body, &args)).await?;
        serde_json::from_value(value).map_err(|e| PageError::Host(e.to_string()))
    }

    async fn run_on(
        &self,
        element: ElementHandle,
        body: &str,
        mut args: Value,
    ) -> Result<Value, PageError> {
        args["handle"] = json!(element.0);
        let reply = self.run(body, args).await?;
        reply_value(reply, Some(element))
    }
}

impl Drop for CdpPage {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

async fn pump_events(
    mut events: mpsc::UnboundedReceiver<CdpResponse>,
    main_frame: String,
    nav_tx: broadcast::Sender<NavigationEvent>,
    subscribers: Subscribers,
) {
    while let Some(event) = events.recv().await {
        match PageSignal::from_event(&event, &main_frame) {
            Some(PageSignal::Mutation(batch)) => {
                subscribers.lock().retain(|tx| tx.send(batch).is_ok());
            }
            Some(PageSignal::Navigation(nav)) => {
                debug!("Navigation ({:?}) to {}", nav.kind, nav.url);
                let _ = nav_tx.send(nav);
            }
            None => {}
        }
    }
    debug!("CDP event stream ended");
    subscribers.lock().clear();
}

#[async_trait]
impl PageDom for CdpPage {
    async fn current_url(&self) -> Result<String, PageError> {
        let reply = self.run(script::CURRENT_URL, json!({})).await?;
        let value = reply_value(reply, None)?;
        value
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| unexpected("location", &value))
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, PageError> {
        let reply = self
            .run(script::QUERY_ALL, json!({"selector": selector}))
            .await?;
        if reply.error.as_deref() == Some("selector") {
            return Err(PageError::InvalidSelector {
                selector: selector.to_string(),
                reason: reply.reason.unwrap_or_default(),
            });
        }
        let value = reply_value(reply, None)?;
        let handles = value
            .as_array()
            .ok_or_else(|| unexpected("query", &value))?
            .iter()
            .filter_map(Value::as_i64)
            .map(ElementHandle)
            .collect();
        Ok(handles)
    }

    async fn read_content(
        &self,
        element: ElementHandle,
        probe: &ContentProbe,
    ) -> Result<ElementContent, PageError> {
        let value = self
            .run_on(
                element,
                script::READ_CONTENT,
                json!({
                    "fileSelectors": probe.file_selectors,
                    "codeSelectors": probe.code_selectors,
                }),
            )
            .await?;
        serde_json::from_value(value).map_err(|e| PageError::Host(e.to_string()))
    }

    async fn scroll_into_view(&self, element: ElementHandle) -> Result<(), PageError> {
        self.run_on(element, script::SCROLL_INTO_VIEW, json!({}))
            .await?;
        Ok(())
    }

    async fn set_highlight(&self, element: ElementHandle, on: bool) -> Result<(), PageError> {
        self.run_on(
            element,
            script::SET_HIGHLIGHT,
            json!({"className": HIGHLIGHT_CLASS, "on": on}),
        )
        .await?;
        Ok(())
    }

    async fn scroll_to_top(&self) -> Result<(), PageError> {
        let reply = self.run(script::SCROLL_TO_TOP, json!({})).await?;
        reply_value(reply, None)?;
        Ok(())
    }
}

#[async_trait]
impl TaggableStore for CdpPage {
    async fn tag(&self, element: ElementHandle, id: MessageId) -> Result<(), PageError> {
        self.run_on(
            element,
            script::TAG,
            json!({"attr": TAG_ATTRIBUTE, "id": id.value()}),
        )
        .await?;
        Ok(())
    }

    async fn lookup(&self, id: MessageId) -> Result<Option<ElementHandle>, PageError> {
        let reply = self
            .run(script::LOOKUP, json!({"attr": TAG_ATTRIBUTE, "id": id.value()}))
            .await?;
        let value = reply_value(reply, None)?;
        Ok(value.as_i64().map(ElementHandle))
    }

    async fn is_tagged(&self, element: ElementHandle) -> Result<bool, PageError> {
        let value = self
            .run_on(element, script::IS_TAGGED, json!({"attr": TAG_ATTRIBUTE}))
            .await?;
        value.as_bool().ok_or_else(|| unexpected("is_tagged", &value))
    }

    async fn clear_tags(&self) -> Result<usize, PageError> {
        let reply = self
            .run(script::CLEAR_TAGS, json!({"attr": TAG_ATTRIBUTE}))
            .await?;
        let value = reply_value(reply, None)?;
        value
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| unexpected("clear_tags", &value))
    }
}

#[async_trait]
impl PageEvents for CdpPage {
    async fn observe_mutations(
        &self,
        container: ElementHandle,
    ) -> Result<mpsc::UnboundedReceiver<MutationBatch>, PageError> {
        self.run_on(container, script::OBSERVE, json!({"binding": MUTATION_BINDING}))
            .await?;
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push(tx);
        debug!("Observing mutations under element {}", container.0);
        Ok(rx)
    }

    fn navigations(&self) -> broadcast::Receiver<NavigationEvent> {
        self.nav_tx.subscribe()
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
