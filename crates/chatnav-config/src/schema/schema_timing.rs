//! Timer settings for the indexer watchers and the navigator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Indexer timing. All values are milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay before the first scan after the indexer starts.
    #[serde(default = "default_initial_scan_delay")]
    pub initial_scan_delay_ms: u64,

    /// Trailing-edge debounce window for mutation-triggered rescans.
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Optional ceiling on how long a continuous mutation stream may defer a
    /// rescan. Unset means pure trailing-edge debounce.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_max_wait_ms: Option<u64>,

    /// URL polling interval.
    #[serde(default = "default_url_poll_interval")]
    pub url_poll_interval_ms: u64,

    /// Delay between a navigation event and the URL comparison.
    #[serde(default = "default_navigation_check_delay")]
    pub navigation_check_delay_ms: u64,

    /// Delay between a session reset and the rescan of the new chat.
    #[serde(default = "default_reset_rescan_delay")]
    pub reset_rescan_delay_ms: u64,

    /// Wait after scrolling to the top before rescanning for a missing message.
    #[serde(default = "default_scroll_settle")]
    pub scroll_settle_ms: u64,

    /// How long the highlight stays on a message after a jump.
    #[serde(default = "default_highlight")]
    pub highlight_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            initial_scan_delay_ms: default_initial_scan_delay(),
            debounce_ms: default_debounce(),
            debounce_max_wait_ms: None,
            url_poll_interval_ms: default_url_poll_interval(),
            navigation_check_delay_ms: default_navigation_check_delay(),
            reset_rescan_delay_ms: default_reset_rescan_delay(),
            scroll_settle_ms: default_scroll_settle(),
            highlight_ms: default_highlight(),
        }
    }
}

impl TimingConfig {
    pub fn initial_scan_delay(&self) -> Duration {
        Duration::from_millis(self.initial_scan_delay_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn debounce_max_wait(&self) -> Option<Duration> {
        self.debounce_max_wait_ms.map(Duration::from_millis)
    }

    pub fn url_poll_interval(&self) -> Duration {
        Duration::from_millis(self.url_poll_interval_ms)
    }

    pub fn navigation_check_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_check_delay_ms)
    }

    pub fn reset_rescan_delay(&self) -> Duration {
        Duration::from_millis(self.reset_rescan_delay_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

fn default_initial_scan_delay() -> u64 {
    1000
}

fn default_debounce() -> u64 {
    500
}

fn default_url_poll_interval() -> u64 {
    1000
}

fn default_navigation_check_delay() -> u64 {
    100
}

fn default_reset_rescan_delay() -> u64 {
    500
}

fn default_scroll_settle() -> u64 {
    2000
}

fn default_highlight() -> u64 {
    2000
}

/// Navigator behaviour after a jump, and channel patience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Close delay when the message was found immediately.
    #[serde(default = "default_close_after_found")]
    pub close_after_found_ms: u64,

    /// Close delay when the indexer had to load older history first.
    #[serde(default = "default_close_after_loading")]
    pub close_after_loading_ms: u64,

    /// Close delay for any other successful reply.
    #[serde(default = "default_close_after_other")]
    pub close_after_other_ms: u64,

    /// Upper bound on a single channel round trip.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            close_after_found_ms: default_close_after_found(),
            close_after_loading_ms: default_close_after_loading(),
            close_after_other_ms: default_close_after_other(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl NavigatorConfig {
    pub fn close_after_found(&self) -> Duration {
        Duration::from_millis(self.close_after_found_ms)
    }

    pub fn close_after_loading(&self) -> Duration {
        Duration::from_millis(self.close_after_loading_ms)
    }

    pub fn close_after_other(&self) -> Duration {
        Duration::from_millis(self.close_after_other_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn default_close_after_found() -> u64 {
    300
}

fn default_close_after_loading() -> u64 {
    2500
}

fn default_close_after_other() -> u64 {
    500
}

fn default_request_timeout() -> u64 {
    5000
}
