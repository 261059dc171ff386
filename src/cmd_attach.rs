//! `chatnav attach`: navigate a chat tab in a running Chrome.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use chatnav_config::{Config, is_supported_url};
use chatnav_host_cdp::{CdpClient, CdpPage, PageInfo, pick_page};

use crate::{load_config, runner};

/// Tab to attach to: the first whose URL contains `url_contains`, otherwise
/// the first tab on a supported chat site.
fn choose_tab<'a>(pages: &'a [PageInfo], url_contains: Option<&str>) -> Option<&'a PageInfo> {
    match url_contains {
        Some(needle) => pick_page(pages, |url| url.contains(needle)),
        None => pick_page(pages, is_supported_url),
    }
}

fn endpoint_for(config: &Config, endpoint: Option<String>) -> String {
    endpoint.unwrap_or_else(|| config.cdp.endpoint.clone())
}

pub(crate) async fn run(
    config_path: Option<&PathBuf>,
    endpoint: Option<String>,
    url_contains: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let endpoint = endpoint_for(&config, endpoint);

    let client = CdpClient::connect(&endpoint).await?;
    info!("Connected to {}", client.browser_ws_url());

    let pages = client.list_pages().await?;
    let Some(target) = choose_tab(&pages, url_contains.as_deref()) else {
        println!("No matching chat tab is open. Open one of:");
        for site in &config.sites {
            println!("  {:<10} {}", site.name, site.hosts.join(", "));
        }
        return Ok(());
    };

    let page = CdpPage::attach(&client, target).await?;
    println!("Attached to {}", page.target_url());

    runner::navigate(Arc::new(page), &config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str, url: &str) -> PageInfo {
        PageInfo {
            id: id.to_string(),
            page_type: "page".to_string(),
            title: String::new(),
            url: url.to_string(),
            web_socket_debugger_url: None,
        }
    }

    #[test]
    fn test_choose_first_supported_tab() {
        let pages = vec![
            tab("docs", "https://docs.rs/tokio"),
            tab("gpt", "https://chatgpt.com/c/42"),
            tab("claude", "https://claude.ai/chat/7"),
        ];
        assert_eq!(choose_tab(&pages, None).map(|p| p.id.as_str()), Some("gpt"));
    }

    #[test]
    fn test_choose_tab_by_url_fragment() {
        let pages = vec![
            tab("gpt", "https://chatgpt.com/c/42"),
            tab("claude", "https://claude.ai/chat/7"),
        ];
        assert_eq!(
            choose_tab(&pages, Some("claude.ai")).map(|p| p.id.as_str()),
            Some("claude")
        );
    }

    #[test]
    fn test_no_supported_tab() {
        let pages = vec![tab("docs", "https://docs.rs/tokio")];
        assert!(choose_tab(&pages, None).is_none());
    }

    #[test]
    fn test_endpoint_override() {
        let config = Config::default();
        assert_eq!(endpoint_for(&config, None), "http://127.0.0.1:9222");
        assert_eq!(
            endpoint_for(&config, Some("http://10.0.0.2:9333".to_string())),
            "http://10.0.0.2:9333"
        );
    }
}
