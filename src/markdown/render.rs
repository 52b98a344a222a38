//! Raw markdown → editable HTML markup.
//!
//! A fixed, ordered chain of global pattern rewrites. Order is load-bearing:
//! later stages match text produced by earlier ones (bold must run before
//! italic or `**` is half-eaten by the italic rule; the list-merge cleanup
//! only sees wrappers emitted by the list stages). Changing the sequence
//! changes visible output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{Highlighter, escape_html, flatten_text};

/// Knobs that affect rendering, passed per call.
pub struct RenderConfig<'a> {
    /// Escape-and-tag code blocks for a highlighting pass.
    pub syntax_highlighting: bool,
    /// The highlighting collaborator, if one is available.
    pub highlighter: Option<&'a dyn Highlighter>,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
            highlighter: None,
        }
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern compiles")
}

static HEADING3: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^### (.*)$"));
static HEADING2: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^## (.*)$"));
static HEADING1: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^# (.*)$"));
static BOLD_STARS: Lazy<Regex> = Lazy::new(|| pattern(r"\*\*(.*?)\*\*"));
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| pattern(r"__(.*?)__"));
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| pattern(r"\*(.*?)\*"));
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| pattern(r"_(.*?)_"));
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| pattern(r"~~(.*?)~~"));
static CODE_FENCE: Lazy<Regex> = Lazy::new(|| pattern(r"(?s)```(\w+)?\n(.*?)\n```"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| pattern(r"`(.*?)`"));
static BLOCKQUOTE: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^> (.*)$"));
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^---$"));
static LINK: Lazy<Regex> = Lazy::new(|| pattern(r"\[([^\]]+)\]\(([^)]+)\)"));
static IMAGE: Lazy<Regex> = Lazy::new(|| pattern(r"!\[([^\]]+)\]\(([^)]+)\)"));
static LIST_STAR: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^\s*\n\* (.*)"));
static LIST_DASH: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^\s*\n- (.*)"));
static LIST_ORDERED: Lazy<Regex> = Lazy::new(|| pattern(r"(?m)^\s*\n\d+\. (.*)"));
static MERGE_UL: Lazy<Regex> = Lazy::new(|| pattern(r"</ul>\s*<ul>"));
static MERGE_OL: Lazy<Regex> = Lazy::new(|| pattern(r"</ol>\s*<ol>"));
static TAGGED_CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| pattern(r#"(?s)<pre><code class="language-(\w+)">(.*?)</code></pre>"#));

/// Render raw markdown to HTML markup.
///
/// Deterministic and total: anything no stage matches passes through
/// unchanged. See the module docs for why the stage order is fixed.
pub fn render(raw: &str, config: &RenderConfig) -> String {
    let _scope = crate::perf::scope("markdown.render");

    // Headers, longest marker first so `###` is not eaten by `#`.
    let html = HEADING3.replace_all(raw, "<h3>$1</h3>");
    let html = HEADING2.replace_all(&html, "<h2>$1</h2>");
    let html = HEADING1.replace_all(&html, "<h1>$1</h1>");

    // Bold before italic: the italic rule would consume half of `**`.
    let html = BOLD_STARS.replace_all(&html, "<strong>$1</strong>");
    let html = BOLD_UNDERSCORES.replace_all(&html, "<strong>$1</strong>");
    let html = ITALIC_STAR.replace_all(&html, "<em>$1</em>");
    let html = ITALIC_UNDERSCORE.replace_all(&html, "<em>$1</em>");

    let html = STRIKETHROUGH.replace_all(&html, "<del>$1</del>");

    // Fenced code blocks. Bodies are escaped here so no later stage can
    // touch them; a language tag marks the block for the highlighting pass.
    let html = CODE_FENCE.replace_all(&html, |caps: &Captures| {
        let code = &caps[2];
        match caps.get(1) {
            Some(lang) if config.syntax_highlighting => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>",
                lang.as_str(),
                escape_html(code)
            ),
            _ => format!("<pre><code>{}</code></pre>", escape_html(code)),
        }
    });

    let html = INLINE_CODE.replace_all(&html, "<code>$1</code>");
    let html = BLOCKQUOTE.replace_all(&html, "<blockquote>$1</blockquote>");
    let html = HORIZONTAL_RULE.replace_all(&html, "<hr>");

    let html = LINK.replace_all(&html, "<a href=\"$2\" target=\"_blank\">$1</a>");
    let html = IMAGE.replace_all(&html, "<img src=\"$2\" alt=\"$1\">");

    // Lists: only a blank line followed by a marker opens a wrapper, one
    // item per wrapper. Adjacent same-kind wrappers are merged afterwards.
    let html = LIST_STAR.replace_all(&html, "<ul>\n<li>$1</li>\n</ul>");
    let html = LIST_DASH.replace_all(&html, "<ul>\n<li>$1</li>\n</ul>");
    let html = LIST_ORDERED.replace_all(&html, "<ol>\n<li>$1</li>\n</ul>");
    let html = MERGE_UL.replace_all(&html, "");
    let html = MERGE_OL.replace_all(&html, "");

    // Paragraph boundaries, then remaining line breaks.
    let html = html.replace("\n\n", "</p><p>");
    let mut html = html.replace('\n', "<br>");

    if !html.starts_with('<') || html.starts_with("<p>") {
        html = format!("<p>{html}</p>");
    }

    if config.syntax_highlighting {
        if let Some(highlighter) = config.highlighter {
            html = apply_highlighting(&html, highlighter);
        }
    }

    html
}

/// Run the highlighting collaborator over every tagged code block.
///
/// The collaborator sees the block body's flattened text, the way a DOM
/// `textContent` read would give it: `<br>` tags dropped, entities
/// decoded. If the collaborator declines, the escaped body stays in
/// place.
fn apply_highlighting(html: &str, highlighter: &dyn Highlighter) -> String {
    TAGGED_CODE_BLOCK
        .replace_all(html, |caps: &Captures| {
            let lang = &caps[1];
            let code = flatten_text(&caps[2]);
            highlighter.highlight(lang, &code).map_or_else(
                || caps[0].to_string(),
                |markup| format!("<pre><code class=\"language-{lang}\">{markup}</code></pre>"),
            )
        })
        .into_owned()
}
