//! One-line summaries of message elements.

use chatnav_config::ExtractionConfig;
use chatnav_protocols::{ElementContent, ImageInfo};

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;

const IMAGE_MARK: &str = "🖼️";
const FILE_MARK: &str = "📎";
const CODE_MARK: &str = "💻";

/// Build the display summary of one element.
///
/// Attachment annotations (images, files, code blocks) come first, then the
/// whitespace-collapsed text, joined by the configured delimiter. Results
/// longer than `max_length` characters are cut and get the ellipsis; an
/// empty result becomes the placeholder.
pub fn summarize(content: &ElementContent, config: &ExtractionConfig) -> String {
    let mut parts = annotations(content, config);

    let text = collapse_whitespace(&content.text);
    if !text.is_empty() {
        parts.push(text);
    }

    let summary = truncate(&parts.join(&config.delimiter), config.max_length, &config.ellipsis);
    if summary.is_empty() {
        config.placeholder.clone()
    } else {
        summary
    }
}

/// Whether an image looks like user content rather than UI chrome.
///
/// Images with both dimensions known and either below the threshold are
/// icons, as are sources containing an icon hint.
pub fn is_content_image(image: &ImageInfo, config: &ExtractionConfig) -> bool {
    let min = config.min_image_dimension;
    if image.width > 0 && image.height > 0 && (image.width < min || image.height < min) {
        return false;
    }
    !config
        .icon_hints
        .iter()
        .any(|hint| !hint.is_empty() && image.src.contains(hint.as_str()))
}

fn annotations(content: &ElementContent, config: &ExtractionConfig) -> Vec<String> {
    let images = content
        .images
        .iter()
        .filter(|image| is_content_image(image, config))
        .count();

    let mut parts = Vec::new();
    if images > 0 {
        parts.push(format!("{} {}", IMAGE_MARK, counted(images, "image")));
    }
    if content.file_indicators > 0 {
        parts.push(format!("{} {}", FILE_MARK, counted(content.file_indicators, "file")));
    }
    if content.code_blocks > 0 {
        parts.push(format!("{} {}", CODE_MARK, counted(content.code_blocks, "code block")));
    }
    parts
}

fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Trim and collapse every whitespace run to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to `max_chars` characters and append `ellipsis` if it was longer.
pub fn truncate(text: &str, max_chars: usize, ellipsis: &str) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ellipsis),
        None => text.to_string(),
    }
}
