use super::*;

fn probe() -> ContentProbe {
    ContentProbe::default()
}

#[tokio::test]
async fn test_query_returns_insertion_order() {
    let page = MemoryPage::new("https://claude.ai/chat/1");
    let a = page.insert(&[".msg"], ElementContent::text("a"));
    let b = page.insert(&[".msg", ".other"], ElementContent::text("b"));

    assert_eq!(page.query_all(".msg").await.unwrap(), vec![a, b]);
    assert_eq!(page.query_all(".other").await.unwrap(), vec![b]);
    assert!(page.query_all(".unknown").await.unwrap().is_empty());
    assert_eq!(page.query_first(".msg").await.unwrap(), Some(a));
}

#[tokio::test]
async fn test_invalid_selector() {
    let page = MemoryPage::new("u");
    page.mark_invalid(":has(");

    let err = page.query_all(":has(").await.unwrap_err();
    assert!(err.is_selector_error());
}

#[tokio::test]
async fn test_tagging() {
    let page = MemoryPage::new("u");
    let el = page.insert(&[".msg"], ElementContent::text("a"));

    assert!(!page.is_tagged(el).await.unwrap());
    page.tag(el, MessageId(7)).await.unwrap();
    assert!(page.is_tagged(el).await.unwrap());
    assert_eq!(page.lookup(MessageId(7)).await.unwrap(), Some(el));
    assert_eq!(page.tag_of(el), Some(MessageId(7)));

    let err = page.tag(el, MessageId(8)).await.unwrap_err();
    assert!(matches!(err, PageError::AlreadyTagged { existing: MessageId(7), .. }));
}

#[tokio::test]
async fn test_clear_tags() {
    let page = MemoryPage::new("u");
    let a = page.insert(&[".msg"], ElementContent::text("a"));
    let b = page.insert(&[".msg"], ElementContent::text("b"));
    page.tag(a, MessageId(0)).await.unwrap();
    page.tag(b, MessageId(1)).await.unwrap();

    assert_eq!(page.clear_tags().await.unwrap(), 2);
    assert_eq!(page.lookup(MessageId(0)).await.unwrap(), None);
    assert!(page.journal().contains(&PageOp::TagsCleared(2)));
}

#[tokio::test]
async fn test_clear_tags_includes_detached_elements() {
    let page = MemoryPage::new("u");
    let kept = page.insert(&[".msg"], ElementContent::text("kept"));
    let gone = page.insert(&[".msg"], ElementContent::text("gone"));
    page.tag(kept, MessageId(0)).await.unwrap();
    page.tag(gone, MessageId(1)).await.unwrap();
    page.detach(gone);

    assert_eq!(page.clear_tags().await.unwrap(), 2);
    assert_eq!(page.tag_of(gone), None);

    page.restore_on_scroll(gone, &[".msg"]);
    page.scroll_to_top().await.unwrap();
    assert!(!page.is_tagged(gone).await.unwrap());
}

#[tokio::test]
async fn test_detached_element_not_found() {
    let page = MemoryPage::new("u");
    let el = page.insert(&[".msg"], ElementContent::text("a"));
    page.tag(el, MessageId(0)).await.unwrap();

    page.detach(el);

    assert_eq!(page.lookup(MessageId(0)).await.unwrap(), None);
    assert!(page.query_all(".msg").await.unwrap().is_empty());
    assert!(matches!(
        page.read_content(el, &probe()).await,
        Err(PageError::ElementDetached(_))
    ));
}

#[tokio::test]
async fn test_staged_history_attaches_on_scroll_to_top() {
    let page = MemoryPage::new("u");
    let current = page.insert(&[".msg"], ElementContent::text("current"));
    let oldest = page.stage_history(&[".msg"], ElementContent::text("oldest"));
    let older = page.stage_history(&[".msg"], ElementContent::text("older"));

    assert_eq!(page.query_all(".msg").await.unwrap(), vec![current]);

    page.scroll_to_top().await.unwrap();

    assert_eq!(
        page.query_all(".msg").await.unwrap(),
        vec![oldest, older, current]
    );
    assert!(page.journal().contains(&PageOp::ScrolledToTop));
}

#[tokio::test]
async fn test_mutation_notifications() {
    let page = MemoryPage::new("u");
    let container = page.add_container("main");
    let mut rx = page.observe_mutations(container).await.unwrap();

    page.insert(&[".msg"], ElementContent::text("a"));
    assert_eq!(rx.recv().await, Some(MutationBatch::added(1)));

    let el = page.insert(&[".msg"], ElementContent::text("b"));
    rx.recv().await.unwrap();
    page.detach(el);
    let batch = rx.recv().await.unwrap();
    assert!(!batch.has_additions());
    assert_eq!(batch.removed_nodes, 1);
}

#[tokio::test]
async fn test_navigation_events() {
    let page = MemoryPage::new("https://chatgpt.com/c/a");
    let mut events = page.navigations();

    page.push_url("https://chatgpt.com/c/b");
    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, NavigationKind::Push);
    assert_eq!(page.current_url().await.unwrap(), "https://chatgpt.com/c/b");

    page.set_url("https://chatgpt.com/c/c");
    assert!(events.try_recv().is_err());
    assert_eq!(page.current_url().await.unwrap(), "https://chatgpt.com/c/c");
}

#[tokio::test]
async fn test_highlight_and_scroll_recorded() {
    let page = MemoryPage::new("u");
    let el = page.insert(&[".msg"], ElementContent::text("a"));

    page.scroll_into_view(el).await.unwrap();
    page.set_highlight(el, true).await.unwrap();
    assert!(page.is_highlighted(el));

    page.set_highlight(el, false).await.unwrap();
    assert!(!page.is_highlighted(el));
    assert_eq!(
        page.journal(),
        vec![
            PageOp::ScrolledIntoView(el),
            PageOp::Highlight(el, true),
            PageOp::Highlight(el, false),
        ]
    );
}

#[tokio::test]
async fn test_disconnect() {
    let page = MemoryPage::new("u");
    page.disconnect();
    assert!(matches!(page.current_url().await, Err(PageError::Disconnected)));
    assert!(matches!(page.query_all(".msg").await, Err(PageError::Disconnected)));
}
