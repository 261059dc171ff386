use super::*;
use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use chatnav_protocols::{Request, Response};
use parking_lot::Mutex;

use crate::view::FeedbackKind;

/// Channel answering from a queue of canned results and recording requests.
#[derive(Default)]
struct ScriptedChannel {
    replies: Mutex<VecDeque<Result<Response, ChannelError>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedChannel {
    fn with(replies: Vec<Result<Response, ChannelError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
        })
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl IndexerChannel for ScriptedChannel {
    async fn request(&self, request: Request) -> Result<Response, ChannelError> {
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ChannelError::Closed))
    }
}

/// Channel that never answers.
struct SilentChannel;

#[async_trait]
impl IndexerChannel for SilentChannel {
    async fn request(&self, _request: Request) -> Result<Response, ChannelError> {
        std::future::pending().await
    }
}

fn records(texts: &[&str]) -> Vec<MessageRecord> {
    // Newest first, as the indexer sends them.
    let n = texts.len() as u64;
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| MessageRecord::new(MessageId(n - 1 - i as u64), *t))
        .collect()
}

fn messages(texts: &[&str]) -> Result<Response, ChannelError> {
    let messages = records(texts);
    Ok(Response::Messages(MessagesResponse {
        total_indexed: messages.len(),
        messages,
        site_name: "ChatGPT".to_string(),
    }))
}

fn scroll(response: ScrollResponse) -> Result<Response, ChannelError> {
    Ok(Response::Scroll(response))
}

fn controller(channel: Arc<dyn IndexerChannel>) -> NavigatorController {
    NavigatorController::new(channel, NavigatorConfig::default())
}

#[test]
fn test_filter_records_pure_and_ordered() {
    let snapshot = records(&["Rust lifetimes", "python typing", "more RUST"]);
    let before = snapshot.clone();

    let hits = filter_records(&snapshot, "rust");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].text, "Rust lifetimes");
    assert_eq!(hits[1].text, "more RUST");
    assert_eq!(snapshot, before);
}

#[test]
fn test_filter_records_empty_query_keeps_all() {
    let snapshot = records(&["a", "b", "c"]);
    let all = filter_records(&snapshot, "   ");
    let texts: Vec<_> = all.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_fetch_ready() {
    let channel = ScriptedChannel::with(vec![messages(&["newest", "oldest"])]);
    let mut nav = controller(channel.clone());

    assert_eq!(nav.state(), &ViewState::Loading);
    assert_eq!(nav.fetch().await, &ViewState::Ready);
    assert_eq!(nav.site_name(), Some("ChatGPT"));
    assert_eq!(nav.site_label().as_deref(), Some("on ChatGPT"));
    assert_eq!(nav.total_indexed(), 2);
    assert_eq!(nav.snapshot()[0].text, "newest");
    assert_eq!(channel.requests(), vec![Request::GetMessages]);
}

#[tokio::test]
async fn test_fetch_empty_is_not_disconnected() {
    let channel = ScriptedChannel::with(vec![messages(&[])]);
    let mut nav = controller(channel);

    assert_eq!(nav.fetch().await, &ViewState::Empty);
    assert!(nav.state().is_connected());
}

#[tokio::test]
async fn test_fetch_unreachable_is_disconnected() {
    let channel = ScriptedChannel::with(vec![Err(ChannelError::Unreachable(
        "no content script".to_string(),
    ))]);
    let mut nav = controller(channel);

    let state = nav.fetch().await.clone();
    assert_eq!(state, ViewState::Disconnected(UNABLE_TO_CONNECT.to_string()));
    assert_ne!(state, ViewState::Empty);
    assert!(!state.is_connected());
}

#[tokio::test(start_paused = true)]
async fn test_fetch_timeout_is_disconnected() {
    let mut nav = controller(Arc::new(SilentChannel));
    let state = nav.fetch().await.clone();
    assert!(matches!(state, ViewState::Disconnected(_)));
}

#[tokio::test]
async fn test_query_does_not_mutate_snapshot() {
    let channel = ScriptedChannel::with(vec![messages(&["deploy script", "unit tests", "deploy docs"])]);
    let mut nav = controller(channel);
    nav.fetch().await;

    nav.set_query("  DEPLOY ");
    assert_eq!(nav.filtered().len(), 2);
    assert_eq!(nav.snapshot().len(), 3);
    assert_eq!(nav.count_label(), "2 messages (3 total)");

    nav.set_query("");
    assert_eq!(nav.filtered().len(), 3);
    assert_eq!(nav.count_label(), "3 messages");
}

#[tokio::test]
async fn test_entries_badges_and_ages() {
    let channel = ScriptedChannel::with(vec![messages(&["c", "b", "a"])]);
    let mut nav = controller(channel);
    nav.fetch().await;

    let entries = nav.entries();
    let badges: Vec<_> = entries.iter().map(|e| e.badge.as_str()).collect();
    assert_eq!(badges, vec!["#3", "#2", "#1"]);
    assert_eq!(entries[0].id, MessageId(2));
    assert!(entries.iter().all(|e| e.age == "just now"));
}

#[tokio::test]
async fn test_select_found() {
    let channel = ScriptedChannel::with(vec![scroll(ScrollResponse::found())]);
    let nav = controller(channel.clone());

    let outcome = nav.select(MessageId(4)).await;
    assert_eq!(outcome.feedback, Some(Feedback::success(JUMPING)));
    assert_eq!(outcome.close_after, Some(Duration::from_millis(300)));
    assert_eq!(channel.requests(), vec![Request::ScrollToMsg { id: MessageId(4) }]);
}

#[tokio::test]
async fn test_select_loading() {
    let channel = ScriptedChannel::with(vec![scroll(ScrollResponse::loading())]);
    let nav = controller(channel);

    let outcome = nav.select(MessageId(0)).await;
    let feedback = outcome.feedback.unwrap();
    assert_eq!(feedback.kind, FeedbackKind::Info);
    assert_eq!(feedback.message, LOADING_OLDER);
    assert_eq!(outcome.close_after, Some(Duration::from_millis(2500)));
}

#[tokio::test]
async fn test_select_neither_found_nor_loading() {
    let channel = ScriptedChannel::with(vec![scroll(ScrollResponse {
        success: false,
        found: false,
        loading: None,
    })]);
    let nav = controller(channel);

    let outcome = nav.select(MessageId(0)).await;
    assert_eq!(outcome.feedback, None);
    assert_eq!(outcome.close_after, Some(Duration::from_millis(500)));
}

#[tokio::test]
async fn test_select_channel_failure_stays_open() {
    let channel = ScriptedChannel::with(vec![Err(ChannelError::Closed)]);
    let nav = controller(channel);

    let outcome = nav.select(MessageId(0)).await;
    assert_eq!(outcome.feedback, Some(Feedback::error(CONNECTION_FAILED)));
    assert_eq!(outcome.close_after, None);
}

#[tokio::test]
async fn test_select_wrong_response_shape_is_failure() {
    let channel = ScriptedChannel::with(vec![messages(&["x"])]);
    let nav = controller(channel);

    let outcome = nav.select(MessageId(0)).await;
    assert_eq!(outcome.feedback.unwrap().kind, FeedbackKind::Error);
}

#[tokio::test]
async fn test_rescan_reports_count() {
    let channel = ScriptedChannel::with(vec![Ok(Response::Rescan(RescanResponse {
        success: true,
        message_count: 7,
    }))]);
    let nav = controller(channel.clone());

    assert_eq!(nav.rescan().await.unwrap(), 7);
    assert_eq!(channel.requests(), vec![Request::Rescan]);
}

#[tokio::test]
async fn test_refresh_tolerates_rescan_failure() {
    let channel = ScriptedChannel::with(vec![
        Err(ChannelError::Timeout(5000)),
        messages(&["still here"]),
    ]);
    let mut nav = controller(channel.clone());

    assert_eq!(nav.refresh().await, &ViewState::Ready);
    assert_eq!(channel.requests(), vec![Request::Rescan, Request::GetMessages]);
}
