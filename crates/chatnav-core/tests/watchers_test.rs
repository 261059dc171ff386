//! Watcher behaviour against the in-memory page, on paused tokio time.

use std::sync::Arc;
use std::time::Duration;

use chatnav_config::{Config, SiteProfile};
use chatnav_core::{LocalChannel, MemoryPage, PageIndexer};
use chatnav_protocols::{ElementContent, IndexerChannel, MessageId};

// ============================================================================
// Test Helpers
// ============================================================================

const URL: &str = "https://chat.test/c/first";
const MSG: &str = ".user-msg";

fn config() -> Config {
    Config {
        sites: vec![SiteProfile::new("Test", &["chat.test"], MSG, "main")],
        ..Config::default()
    }
}

fn page_with_container() -> Arc<MemoryPage> {
    let page = Arc::new(MemoryPage::new(URL));
    page.add_container("main");
    page
}

async fn indexer_for(page: &Arc<MemoryPage>) -> PageIndexer {
    PageIndexer::for_page(page.clone(), &config())
        .await
        .unwrap()
        .expect("profile should match")
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_start_waits_then_scans() {
    let page = page_with_container();
    page.insert(&[MSG], ElementContent::text("hello"));
    let indexer = indexer_for(&page).await;

    let started = tokio::time::Instant::now();
    let handle = indexer.start().await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert!(handle.is_observing_mutations());
    assert_eq!(indexer.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_missing_container_still_polls_url() {
    let page = Arc::new(MemoryPage::new(URL));
    page.insert(&[MSG], ElementContent::text("hello"));
    let indexer = indexer_for(&page).await;

    let handle = indexer.start().await.unwrap();
    assert!(!handle.is_observing_mutations());

    page.set_url("https://chat.test/c/second");
    sleep_ms(1100).await;
    assert_eq!(indexer.session_url().await, "https://chat.test/c/second");
}

// ============================================================================
// Structural changes
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_mutation_burst_rescans_once_after_debounce() {
    let page = page_with_container();
    let indexer = indexer_for(&page).await;
    let _handle = indexer.start_watchers().await.unwrap();

    page.insert(&[MSG], ElementContent::text("one"));
    sleep_ms(200).await;
    page.insert(&[MSG], ElementContent::text("two"));
    sleep_ms(400).await;
    assert!(indexer.is_empty().await);

    sleep_ms(150).await;
    assert_eq!(indexer.len().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_removals_do_not_rescan() {
    let page = page_with_container();
    let el = page.insert(&[MSG], ElementContent::text("one"));
    let indexer = indexer_for(&page).await;
    let _handle = indexer.start_watchers().await.unwrap();

    page.detach(el);
    page.clear_journal();
    sleep_ms(900).await;

    assert!(page.journal().is_empty());
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_polled_url_change_resets_and_rescans() {
    let page = page_with_container();
    let old = page.insert(&[MSG], ElementContent::text("old"));
    let indexer = indexer_for(&page).await;
    indexer.scan().await.unwrap();
    let _handle = indexer.start_watchers().await.unwrap();

    page.set_url("https://chat.test/c/second");
    sleep_ms(1050).await;

    assert!(indexer.is_empty().await);
    assert_eq!(page.tag_of(old), None);

    page.detach(old);
    page.insert(&[MSG], ElementContent::text("new"));
    sleep_ms(500).await;

    let snapshot = indexer.snapshot().await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, MessageId(0));
    assert_eq!(snapshot[0].text, "new");
}

#[tokio::test(start_paused = true)]
async fn test_history_push_resets_before_next_poll() {
    let page = page_with_container();
    page.insert(&[MSG], ElementContent::text("old"));
    let indexer = indexer_for(&page).await;
    indexer.scan().await.unwrap();
    let _handle = indexer.start_watchers().await.unwrap();

    sleep_ms(10).await;
    page.push_url("https://chat.test/c/pushed");
    sleep_ms(50).await;
    assert_eq!(indexer.len().await, 1);

    sleep_ms(100).await;
    assert_eq!(indexer.session_url().await, "https://chat.test/c/pushed");

    // Delayed rescan picks the (untagged) page content up again.
    sleep_ms(550).await;
    assert_eq!(indexer.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_history_replace_with_same_url_keeps_session() {
    let page = page_with_container();
    page.insert(&[MSG], ElementContent::text("kept"));
    let indexer = indexer_for(&page).await;
    indexer.scan().await.unwrap();
    let _handle = indexer.start_watchers().await.unwrap();

    page.replace_url(URL);
    sleep_ms(300).await;

    assert_eq!(indexer.len().await, 1);
    assert_eq!(indexer.session_url().await, URL);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_stopped_watchers_ignore_changes() {
    let page = page_with_container();
    let indexer = indexer_for(&page).await;
    let handle = indexer.start_watchers().await.unwrap();

    handle.stop().await;

    page.insert(&[MSG], ElementContent::text("late"));
    page.set_url("https://chat.test/c/other");
    sleep_ms(3000).await;

    assert!(indexer.is_empty().await);
    assert_eq!(indexer.session_url().await, URL);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_watchers() {
    let page = page_with_container();
    let indexer = indexer_for(&page).await;
    let handle = indexer.start_watchers().await.unwrap();
    drop(handle);

    page.set_url("https://chat.test/c/other");
    sleep_ms(3000).await;
    assert_eq!(indexer.session_url().await, URL);
}

// ============================================================================
// Channel end to end
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_channel_sees_watcher_updates() {
    let page = page_with_container();
    let indexer = indexer_for(&page).await;
    let _handle = indexer.start_watchers().await.unwrap();
    let (channel, _task) = LocalChannel::serve(indexer.clone(), Duration::from_secs(5));

    assert_eq!(channel.get_messages().await.unwrap().total_indexed, 0);

    page.insert(&[MSG], ElementContent::text("streamed in"));
    sleep_ms(600).await;

    let messages = channel.get_messages().await.unwrap();
    assert_eq!(messages.total_indexed, 1);
    assert_eq!(messages.messages[0].text, "streamed in");
}
