//! Editable HTML markup → raw markdown, the approximate inverse of
//! rendering.
//!
//! The chain mirrors the forward pipeline stage by stage, in reverse
//! register: tags back to markers, paragraph wrappers back to blank lines,
//! `<br>` back to newlines, entities decoded last. It is approximate on
//! purpose: markup the forward pass never emits is passed through
//! untouched rather than rejected.
//!
//! Note the ordered-list shape: the forward pass closes `<ol>` wrappers
//! with `</ul>`, and the inverse rule here expects exactly that. A
//! properly closed `<ol>…</ol>` does not match and survives as literal
//! markup.

use once_cell::sync::Lazy;
use regex::Regex;

use super::unescape_html;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

static H1_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<h1>(.*?)</h1>"));
static H2_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<h2>(.*?)</h2>"));
static H3_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<h3>(.*?)</h3>"));
static STRONG_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<strong>(.*?)</strong>"));
static EM_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<em>(.*?)</em>"));
static CODE_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<code>(.*?)</code>"));
static PRE_BLOCK: Lazy<Regex> = Lazy::new(|| pattern(r"(?is)<pre><code[^>]*>(.*?)</code></pre>"));
static ANCHOR_TAG: Lazy<Regex> = Lazy::new(|| pattern(r#"(?i)<a href="([^"]+)"[^>]*>(.*?)</a>"#));
static IMG_TAG: Lazy<Regex> = Lazy::new(|| pattern(r#"(?i)<img src="([^"]+)" alt="([^"]*)"[^>]*>"#));
static UL_ITEM: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<ul>\s*<li>(.*?)</li>\s*</ul>"));
static OL_ITEM: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<ol>\s*<li>(.*?)</li>\s*</ul>"));
static BLOCKQUOTE_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<blockquote>(.*?)</blockquote>"));
static HR_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<hr>"));
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<p>(.*?)</p>"));
static BR_TAG: Lazy<Regex> = Lazy::new(|| pattern(r"(?i)<br>"));

/// Serialize HTML markup back to raw markdown.
///
/// Total over arbitrary input and trims the result. Inline code runs
/// before the fenced-block rule, so a bare `<pre><code>…</code></pre>`
/// (no attributes) is claimed by the inline rule first; only attributed
/// blocks come back as fences.
pub fn serialize(markup: &str) -> String {
    let _scope = crate::perf::scope("markdown.serialize");

    let md = H1_TAG.replace_all(markup, "# $1\n\n");
    let md = H2_TAG.replace_all(&md, "## $1\n\n");
    let md = H3_TAG.replace_all(&md, "### $1\n\n");

    let md = STRONG_TAG.replace_all(&md, "**$1**");
    let md = EM_TAG.replace_all(&md, "*$1*");

    let md = CODE_TAG.replace_all(&md, "`$1`");
    let md = PRE_BLOCK.replace_all(&md, "```\n$1\n```");

    let md = ANCHOR_TAG.replace_all(&md, "[$2]($1)");
    let md = IMG_TAG.replace_all(&md, "![$2]($1)");

    let md = UL_ITEM.replace_all(&md, "- $1\n");
    let md = OL_ITEM.replace_all(&md, "1. $1\n");

    let md = BLOCKQUOTE_TAG.replace_all(&md, "> $1\n");
    let md = HR_TAG.replace_all(&md, "---\n");

    let md = PARAGRAPH.replace_all(&md, "$1\n\n");
    let md = BR_TAG.replace_all(&md, "\n");

    unescape_html(&md).trim().to_string()
}
