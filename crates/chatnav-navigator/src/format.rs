//! Display helpers.

use chrono::{DateTime, Utc};

/// `"N message(s)"`, plus `" (M total)"` when a query hides some messages.
pub fn count_label(shown: usize, total: usize, query_active: bool) -> String {
    let noun = if shown == 1 { "message" } else { "messages" };
    let mut label = format!("{} {}", shown, noun);
    if query_active && shown < total {
        label.push_str(&format!(" ({} total)", total));
    }
    label
}

/// Badge of the entry at `index` in a newest-first view of `len` entries.
pub fn badge(len: usize, index: usize) -> String {
    format!("#{}", len.saturating_sub(index))
}

/// Coarse relative age of `at` as seen from `now`.
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - at).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        at.format("%Y-%m-%d").to_string()
    }
}
