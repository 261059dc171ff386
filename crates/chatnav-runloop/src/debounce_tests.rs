use super::*;
use std::sync::atomic::AtomicUsize;

fn counting_debouncer(window_ms: u64, max_wait_ms: Option<u64>) -> (Debouncer, Arc<AtomicUsize>) {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let debouncer = Debouncer::spawn(
        Duration::from_millis(window_ms),
        max_wait_ms.map(Duration::from_millis),
        move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        },
    );
    (debouncer, runs)
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_single_trigger_fires_after_window() {
    let (debouncer, runs) = counting_debouncer(500, None);

    debouncer.trigger();
    sleep_ms(499).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    sleep_ms(2).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(debouncer.fire_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_burst_fires_once() {
    let (debouncer, runs) = counting_debouncer(500, None);

    for _ in 0..5 {
        debouncer.trigger();
        sleep_ms(100).await;
    }
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    sleep_ms(500).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_trigger_restarts_window() {
    let (debouncer, runs) = counting_debouncer(500, None);

    debouncer.trigger();
    sleep_ms(400).await;
    debouncer.trigger();
    sleep_ms(400).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    sleep_ms(200).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_separate_bursts_fire_separately() {
    let (debouncer, runs) = counting_debouncer(500, None);

    debouncer.trigger();
    sleep_ms(600).await;
    debouncer.trigger();
    sleep_ms(600).await;

    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_continuous_stream_without_max_wait_never_fires() {
    let (debouncer, runs) = counting_debouncer(500, None);

    for _ in 0..20 {
        debouncer.trigger();
        sleep_ms(300).await;
    }

    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_max_wait_caps_continuous_stream() {
    let (debouncer, runs) = counting_debouncer(500, Some(2000));
    assert_eq!(debouncer.max_wait(), Some(Duration::from_millis(2000)));

    for _ in 0..8 {
        debouncer.trigger();
        sleep_ms(300).await;
    }

    // 2400 ms of continuous triggers with a 2000 ms ceiling
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_run() {
    let (debouncer, runs) = counting_debouncer(500, None);

    debouncer.trigger();
    sleep_ms(100).await;
    debouncer.cancel();
    assert!(debouncer.is_cancelled());

    sleep_ms(1000).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    debouncer.trigger();
    sleep_ms(1000).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_parent_token_stops_debouncer() {
    let parent = CancellationToken::new();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    let debouncer = Debouncer::spawn_with_token(
        Duration::from_millis(200),
        None,
        parent.clone(),
        move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        },
    );

    debouncer.trigger();
    parent.cancel();
    sleep_ms(500).await;

    assert!(debouncer.is_cancelled());
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_leaves_parent_token_alive() {
    let parent = CancellationToken::new();
    let debouncer =
        Debouncer::spawn_with_token(Duration::from_millis(200), None, parent.clone(), || async {});

    drop(debouncer);
    assert!(!parent.is_cancelled());
}

#[tokio::test]
async fn test_window_accessor() {
    let (debouncer, _) = counting_debouncer(250, None);
    assert_eq!(debouncer.window(), Duration::from_millis(250));
    assert_eq!(debouncer.max_wait(), None);
}
