//! Markdown rendering and the inverse markup serialization.
//!
//! This module handles:
//! - Rendering raw markdown to editable HTML markup ([`render`])
//! - Serializing edited markup back to markdown ([`serialize`])
//! - Detecting markdown-looking content ([`detect`])
//!
//! Both directions are total functions over arbitrary input: unmatched
//! patterns pass through unchanged, malformed markup produces best-effort
//! output.

mod render;
mod serialize;

pub mod detect;

pub use render::{RenderConfig, render};
pub use serialize::serialize;

/// Collaborator that turns a code block body into highlighted markup.
///
/// `language` is the fence tag (e.g. `js`), `code` is the block body's
/// flattened text (see [`flatten_text`]). Returning `None` (unknown
/// language, or no engine available) leaves the block rendered as plain
/// escaped text.
pub trait Highlighter {
    fn highlight(&self, language: &str, code: &str) -> Option<String>;
}

/// Escape the HTML-special characters `&`, `<`, `>`.
///
/// `&` must be first or the other replacements would be double-escaped.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Reverse [`escape_html`] for the three entities the renderer produces.
pub fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Flatten markup to its text content, the way DOM `textContent` would.
///
/// Tags are stripped entirely (`<br>` contributes no character) and the
/// three escaped entities are decoded. Cursor marks are offsets into this
/// flattened string.
pub fn flatten_text(markup: &str) -> String {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));
    unescape_html(&TAG.replace_all(markup, ""))
}
