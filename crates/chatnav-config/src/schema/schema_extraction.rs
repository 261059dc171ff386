//! Summary extraction settings.

use chatnav_protocols::ContentProbe;
use serde::{Deserialize, Serialize};

/// How message elements are turned into one-line summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Maximum summary length in characters before the ellipsis.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    #[serde(default = "default_ellipsis")]
    pub ellipsis: String,

    /// Substitute for messages with neither text nor attachments.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Separator between annotations and text.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Images with a known dimension below this many pixels are icons.
    #[serde(default = "default_min_image_dimension")]
    pub min_image_dimension: u32,

    /// Image sources containing any of these are UI chrome, not uploads.
    #[serde(default = "default_icon_hints")]
    pub icon_hints: Vec<String>,

    /// Selectors whose matches inside a message count as attached files.
    #[serde(default = "default_file_selectors")]
    pub file_selectors: Vec<String>,

    /// Selectors whose matches inside a message count as code blocks.
    #[serde(default = "default_code_selectors")]
    pub code_selectors: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            ellipsis: default_ellipsis(),
            placeholder: default_placeholder(),
            delimiter: default_delimiter(),
            min_image_dimension: default_min_image_dimension(),
            icon_hints: default_icon_hints(),
            file_selectors: default_file_selectors(),
            code_selectors: default_code_selectors(),
        }
    }
}

impl ExtractionConfig {
    /// Selector probe handed to hosts when reading an element.
    pub fn probe(&self) -> ContentProbe {
        ContentProbe {
            file_selectors: self.file_selectors.clone(),
            code_selectors: self.code_selectors.clone(),
        }
    }
}

fn default_max_length() -> usize {
    150
}

fn default_ellipsis() -> String {
    "...".to_string()
}

fn default_placeholder() -> String {
    "[Empty message]".to_string()
}

fn default_delimiter() -> String {
    " · ".to_string()
}

fn default_min_image_dimension() -> u32 {
    32
}

fn default_icon_hints() -> Vec<String> {
    ["icon", "avatar", "logo"].iter().map(|s| s.to_string()).collect()
}

fn default_file_selectors() -> Vec<String> {
    [
        "a[download]",
        "[class*=\"attachment\"][class*=\"file\"]",
        "[data-file-name]",
        "[aria-label*=\"attached file\"]",
        "[aria-label*=\"uploaded file\"]",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_code_selectors() -> Vec<String> {
    ["pre code", "code[class*=\"language-\"]", ".code-block"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
