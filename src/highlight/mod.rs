//! Syntax highlighting for fenced code blocks.
//!
//! A syntect-backed implementation of the rendering pipeline's
//! [`Highlighter`](crate::markdown::Highlighter) collaborator. Syntax
//! definitions and themes load once per process and are shared; each
//! highlighted block comes back as inline-styled HTML spans.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::markdown::Highlighter;

/// Which half of the theme catalog to pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// [`Highlighter`] backed by syntect's bundled syntaxes and themes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntectHighlighter {
    mode: ThemeMode,
}

impl SyntectHighlighter {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, language: &str, code: &str) -> Option<String> {
        let _scope = crate::perf::scope("highlight.block");
        let syntax_set = syntax_set();
        let syntax = syntax_set
            .find_syntax_by_token(language)
            .or_else(|| syntax_set.find_syntax_by_name(language))?;

        let mut highlighter = HighlightLines::new(syntax, theme(self.mode));
        let mut html = String::new();
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, syntax_set).ok()?;
            let styled = styled_line_to_highlighted_html(&ranges, IncludeBackground::No).ok()?;
            html.push_str(&styled);
        }
        Some(html)
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme(mode: ThemeMode) -> &'static Theme {
    static LIGHT: OnceLock<Theme> = OnceLock::new();
    static DARK: OnceLock<Theme> = OnceLock::new();

    let (slot, preferred) = match mode {
        ThemeMode::Dark => (
            &DARK,
            [
                "Monokai Extended",
                "Monokai Extended Bright",
                "Dracula",
                "Solarized (dark)",
                "base16-ocean.dark",
            ]
            .as_slice(),
        ),
        ThemeMode::Light => (
            &LIGHT,
            [
                "InspiredGitHub",
                "Solarized (light)",
                "base16-ocean.light",
            ]
            .as_slice(),
        ),
    };

    slot.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.theme.load_defaults");
        let theme_set = ThemeSet::load_defaults();
        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}
