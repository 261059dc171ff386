//! Site profiles: per-platform selector configuration.
//!
//! Chat platforms change their markup often. Everything here is data; the
//! indexing algorithm only ever walks `primary` then `fallbacks` in order.

use serde::{Deserialize, Serialize};

/// Declarative selector configuration for one chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Display name reported to navigators (e.g. "Gemini").
    pub name: String,

    /// Hostname fragments; a page matches when its hostname contains one.
    pub hosts: Vec<String>,

    /// Selector tried first for user message elements.
    pub primary: String,

    /// Selectors tried in order when `primary` yields nothing.
    #[serde(default)]
    pub fallbacks: Vec<String>,

    /// Selector of the element whose subtree is watched for new messages.
    pub container: String,
}

impl SiteProfile {
    pub fn new(
        name: impl Into<String>,
        hosts: &[&str],
        primary: impl Into<String>,
        container: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
            primary: primary.into(),
            fallbacks: Vec::new(),
            container: container.into(),
        }
    }

    pub fn with_fallbacks(mut self, fallbacks: &[&str]) -> Self {
        self.fallbacks = fallbacks.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn matches_host(&self, hostname: &str) -> bool {
        self.hosts.iter().any(|h| !h.is_empty() && hostname.contains(h.as_str()))
    }

    /// Primary selector followed by the fallbacks, in evaluation order.
    pub fn selector_chain(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallbacks.iter().map(String::as_str))
    }
}

/// Built-in profiles for the supported platforms.
pub fn default_sites() -> Vec<SiteProfile> {
    vec![
        SiteProfile::new(
            "Gemini",
            &["gemini.google.com"],
            ".query-content, [data-test-id*=\"user\"], .user-query",
            "main, chat-window, .conversation-container, [role=\"main\"]",
        )
        .with_fallbacks(&[
            "message-content[data-author=\"user\"]",
            "[data-author=\"user\"]",
            ".user-message",
            "[data-role=\"user\"]",
            ".message[data-author=\"user\"]",
            "div[class*=\"query\"]",
            "div[class*=\"user\"]",
        ]),
        SiteProfile::new(
            "ChatGPT",
            &["chat.openai.com", "chatgpt.com"],
            "[data-message-author-role=\"user\"]",
            "main, .conversation-container",
        )
        .with_fallbacks(&[
            ".request-:not(.response-)",
            "[data-testid*=\"user\"]",
            ".user-message",
        ]),
        SiteProfile::new(
            "Claude",
            &["claude.ai"],
            "div[data-testid=\"user-message\"]",
            "main, [role=\"main\"]",
        )
        .with_fallbacks(&[
            ".font-claude-message[data-is-user=\"true\"]",
            "[data-is-user-msg=\"true\"]",
            "div.font-user",
            ".font-user-message",
            "div[class*=\"UserMessage\"]",
            ".user-message",
        ]),
    ]
}
