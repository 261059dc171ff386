//! Raw element facts reported by a host page.

use serde::{Deserialize, Serialize};

/// An `<img>` found inside a message element.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageInfo {
    pub src: String,
    /// Rendered (or natural) width in pixels; 0 when unknown.
    #[serde(default)]
    pub width: u32,
    /// Rendered (or natural) height in pixels; 0 when unknown.
    #[serde(default)]
    pub height: u32,
}

impl ImageInfo {
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }
}

/// Everything the indexer needs to summarize one message element.
///
/// Hosts report facts only; filtering and formatting happen in the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementContent {
    /// Rendered text (`innerText`, falling back to `textContent`).
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<ImageInfo>,
    /// Number of elements matching the file-attachment hints.
    #[serde(default)]
    pub file_indicators: usize,
    /// Number of elements matching the code-block hints.
    #[serde(default)]
    pub code_blocks: usize,
}

impl ElementContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: ImageInfo) -> Self {
        self.images.push(image);
        self
    }

    pub fn with_files(mut self, count: usize) -> Self {
        self.file_indicators = count;
        self
    }

    pub fn with_code_blocks(mut self, count: usize) -> Self {
        self.code_blocks = count;
        self
    }
}

/// Selectors a host evaluates inside a message element while reading it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentProbe {
    pub file_selectors: Vec<String>,
    pub code_selectors: Vec<String>,
}
