//! `chatnav demo`: an in-memory chat page, no browser needed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chatnav_config::{Config, SiteProfile};
use chatnav_core::MemoryPage;
use chatnav_protocols::{ElementContent, ImageInfo};

use crate::{load_config, runner};

const LATE_MESSAGE_AFTER: Duration = Duration::from_secs(10);

/// Older history that only materializes after scrolling to the top.
const HISTORY: &[&str] = &[
    "Can you explain how Rust lifetimes interact with async functions?",
    "What is the difference between Arc<Mutex<T>> and a channel?",
];

const VISIBLE: &[&str] = &[
    "How would I debounce a stream of DOM mutation events?",
    "Rewrite that with tokio::select! and a CancellationToken please",
    "Why does my broadcast receiver report Lagged?",
];

fn demo_page(site: &SiteProfile, url: &str) -> Arc<MemoryPage> {
    let page = Arc::new(MemoryPage::new(url));
    let selectors = [site.primary.as_str()];

    for text in HISTORY {
        page.stage_history(&selectors, ElementContent::text(*text));
    }
    page.add_container(&site.container);
    for text in VISIBLE {
        page.insert(&selectors, ElementContent::text(*text));
    }
    page.insert(
        &selectors,
        ElementContent::text("Here is the stack trace, what went wrong?")
            .with_image(ImageInfo::new("https://uploads.example/trace.png", 800, 600))
            .with_code_blocks(1),
    );
    page
}

fn demo_site(config: &Config) -> Option<(&SiteProfile, String)> {
    config.sites.iter().find_map(|site| {
        let host = site.hosts.first()?;
        Some((site, format!("https://{}/chat/demo", host)))
    })
}

pub(crate) async fn run(config_path: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let Some((site, url)) = demo_site(&config) else {
        return Err("no site profile with a host is configured".into());
    };

    println!("Demo {} page at {}", site.name, url);
    println!(
        "A new message arrives after {}s.",
        LATE_MESSAGE_AFTER.as_secs()
    );

    let page = demo_page(site, &url);
    let late = {
        let page = page.clone();
        let selector = site.primary.clone();
        tokio::spawn(async move {
            tokio::time::sleep(LATE_MESSAGE_AFTER).await;
            page.insert(
                &[selector.as_str()],
                ElementContent::text("One more thing: how do I test this with paused time?"),
            );
        })
    };

    let result = runner::navigate(page, &config).await;
    late.abort();
    result
}
