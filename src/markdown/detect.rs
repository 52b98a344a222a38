//! Markdown-likelihood heuristic and export naming.
//!
//! Detection is deliberately shallow: a handful of marker patterns, any
//! one of which is enough. It exists to pick a sensible download name and
//! MIME type, not to validate documents.

use once_cell::sync::Lazy;
use regex::Regex;

/// MIME type for exports detected as markdown.
pub const MARKDOWN_MIME: &str = "text/markdown;charset=utf-8";
/// MIME type for everything else.
pub const PLAIN_TEXT_MIME: &str = "text/plain;charset=utf-8";

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

static MARKER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        pattern(r"(?m)^#{1,6}\s+"),      // headings
        pattern(r"\*\*(.*?)\*\*"),       // bold
        pattern(r"`{3}"),                // code fence
        pattern(r"\[(.*?)\]\((.*?)\)"),  // links
        pattern(r"!\[(.*?)\]\((.*?)\)"), // images
        pattern(r"(?m)^>\s+"),           // blockquote
        pattern(r"(?m)^\s*[-*+]\s+"),    // unordered list
        pattern(r"(?m)^\s*\d+\.\s+"),    // ordered list
    ]
});

static LAST_EXTENSION: Lazy<Regex> = Lazy::new(|| pattern(r"\.[^/.]+$"));

/// Does `text` look like markdown? Blank input never does.
pub fn is_markdown_text(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    MARKER_PATTERNS.iter().any(|rx| rx.is_match(text))
}

/// Choose the download name and MIME type for exporting `text`.
///
/// Markdown content (by heuristic, or because the current name already
/// ends in `.md`) exports as `.md`: the last extension is replaced, or
/// `.md` appended when there is none. An empty filename falls back to
/// `notes.txt`.
pub fn export_disposition(filename: &str, text: &str) -> (String, &'static str) {
    let base = if filename.is_empty() { "notes.txt" } else { filename };
    let already_md = base.to_lowercase().ends_with(".md");

    if is_markdown_text(text) || already_md {
        let name = if already_md {
            base.to_string()
        } else {
            format!("{}.md", LAST_EXTENSION.replace(base, ""))
        };
        (name, MARKDOWN_MIME)
    } else {
        (base.to_string(), PLAIN_TEXT_MIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_sentence_is_not_markdown() {
        assert!(!is_markdown_text("Just a plain sentence, no markup."));
    }

    #[test]
    fn test_blank_text_is_not_markdown() {
        assert!(!is_markdown_text(""));
        assert!(!is_markdown_text("   \n\t\n"));
    }

    #[test]
    fn test_heading_is_markdown() {
        assert!(is_markdown_text("# Title"));
        assert!(is_markdown_text("notes\n###### deep heading"));
    }

    #[test]
    fn test_inline_markers_are_markdown() {
        assert!(is_markdown_text("some **bold** words"));
        assert!(is_markdown_text("a [link](http://example.com)"));
        assert!(is_markdown_text("```\ncode\n```"));
    }

    #[test]
    fn test_block_markers_are_markdown() {
        assert!(is_markdown_text("> quoted"));
        assert!(is_markdown_text("  - item"));
        assert!(is_markdown_text("1. first"));
    }

    #[test]
    fn test_hash_mid_line_is_not_a_heading() {
        assert!(!is_markdown_text("issue #42 is closed"));
    }

    #[test]
    fn test_export_markdown_content_replaces_extension() {
        let (name, mime) = export_disposition("notes.txt", "# Title");
        assert_eq!(name, "notes.md");
        assert_eq!(mime, MARKDOWN_MIME);
    }

    #[test]
    fn test_export_plain_content_keeps_name() {
        let (name, mime) = export_disposition("notes.txt", "nothing special");
        assert_eq!(name, "notes.txt");
        assert_eq!(mime, PLAIN_TEXT_MIME);
    }

    #[test]
    fn test_export_md_name_forces_markdown() {
        let (name, mime) = export_disposition("README.md", "nothing special");
        assert_eq!(name, "README.md");
        assert_eq!(mime, MARKDOWN_MIME);
    }

    #[test]
    fn test_export_replaces_only_last_extension() {
        let (name, _) = export_disposition("archive.tar.gz", "# x");
        assert_eq!(name, "archive.tar.md");
    }

    #[test]
    fn test_export_appends_when_no_extension() {
        let (name, _) = export_disposition("README", "# x");
        assert_eq!(name, "README.md");
    }

    #[test]
    fn test_export_empty_filename_falls_back() {
        let (name, mime) = export_disposition("", "plain");
        assert_eq!(name, "notes.txt");
        assert_eq!(mime, PLAIN_TEXT_MIME);
    }
}
