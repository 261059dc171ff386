use super::*;

fn config() -> ExtractionConfig {
    ExtractionConfig::default()
}

#[test]
fn test_plain_text() {
    let content = ElementContent::text("How do I sort a list?");
    assert_eq!(summarize(&content, &config()), "How do I sort a list?");
}

#[test]
fn test_whitespace_collapsed() {
    let content = ElementContent::text("  first line\n\n  second\tline  ");
    assert_eq!(summarize(&content, &config()), "first line second line");
}

#[test]
fn test_truncates_long_text() {
    let content = ElementContent::text("a".repeat(300));
    let summary = summarize(&content, &config());

    assert!(summary.ends_with("..."));
    assert_eq!(summary.chars().count(), 153);
    assert_eq!(summary.trim_end_matches('.').chars().count(), 150);
}

#[test]
fn test_exact_max_length_not_truncated() {
    let content = ElementContent::text("b".repeat(150));
    let summary = summarize(&content, &config());
    assert_eq!(summary.len(), 150);
    assert!(!summary.ends_with("..."));
}

#[test]
fn test_truncate_counts_characters_not_bytes() {
    let text = "é".repeat(10);
    assert_eq!(truncate(&text, 4, "..."), "éééé...");
    assert_eq!(truncate("short", 10, "..."), "short");
}

#[test]
fn test_empty_content_gets_placeholder() {
    assert_eq!(summarize(&ElementContent::default(), &config()), "[Empty message]");
    assert_eq!(
        summarize(&ElementContent::text(" \n\t "), &config()),
        "[Empty message]"
    );
}

#[test]
fn test_image_annotation_before_text() {
    let content = ElementContent::text("what is this?")
        .with_image(ImageInfo::new("https://cdn.example/upload/1.png", 640, 480));
    assert_eq!(
        summarize(&content, &config()),
        "🖼️ 1 image · what is this?"
    );
}

#[test]
fn test_image_only_message() {
    let content = ElementContent::default()
        .with_image(ImageInfo::new("blob:a", 200, 200))
        .with_image(ImageInfo::new("blob:b", 0, 0));
    assert_eq!(summarize(&content, &config()), "🖼️ 2 images");
}

#[test]
fn test_small_images_excluded() {
    let cfg = config();
    assert!(!is_content_image(&ImageInfo::new("blob:x", 16, 16), &cfg));
    assert!(!is_content_image(&ImageInfo::new("blob:x", 100, 20), &cfg));
    assert!(is_content_image(&ImageInfo::new("blob:x", 32, 32), &cfg));
}

#[test]
fn test_unknown_dimension_kept() {
    let cfg = config();
    assert!(is_content_image(&ImageInfo::new("blob:x", 0, 10), &cfg));
    assert!(is_content_image(&ImageInfo::new("blob:x", 0, 0), &cfg));
}

#[test]
fn test_icon_hints_excluded() {
    let cfg = config();
    assert!(!is_content_image(&ImageInfo::new("/static/user-avatar.png", 64, 64), &cfg));
    assert!(!is_content_image(&ImageInfo::new("/img/logo.svg", 0, 0), &cfg));
    assert!(!is_content_image(&ImageInfo::new("/favicon-icon.png", 128, 128), &cfg));
}

#[test]
fn test_all_annotations_in_order() {
    let content = ElementContent::text("review this")
        .with_image(ImageInfo::new("blob:1", 300, 300))
        .with_files(2)
        .with_code_blocks(1);
    assert_eq!(
        summarize(&content, &config()),
        "🖼️ 1 image · 📎 2 files · 💻 1 code block · review this"
    );
}

#[test]
fn test_filtered_images_leave_no_annotation() {
    let content = ElementContent::text("hi").with_image(ImageInfo::new("/avatar.png", 24, 24));
    assert_eq!(summarize(&content, &config()), "hi");
}

#[test]
fn test_custom_config() {
    let cfg = ExtractionConfig {
        max_length: 5,
        ellipsis: "…".to_string(),
        placeholder: "(none)".to_string(),
        ..ExtractionConfig::default()
    };
    assert_eq!(summarize(&ElementContent::text("abcdefgh"), &cfg), "abcde…");
    assert_eq!(summarize(&ElementContent::default(), &cfg), "(none)");
}

#[test]
fn test_collapse_whitespace() {
    assert_eq!(collapse_whitespace("  a  b\n c "), "a b c");
    assert_eq!(collapse_whitespace(""), "");
}
