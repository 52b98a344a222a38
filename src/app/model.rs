//! The complete application state.

use crate::config::Settings;
use crate::highlight::SyntectHighlighter;
use crate::markdown::{RenderConfig, detect};
use crate::session::EditSession;

/// Filename a fresh document starts with.
pub const DEFAULT_FILENAME: &str = "Untitled.txt";

/// Everything the host surface needs to draw a frame.
///
/// The [`EditSession`] carries the document and the editing mode; the rest
/// is presentation state around it. The highlighter is rebuilt whenever
/// settings change so its theme follows the markdown theme.
#[derive(Debug)]
pub struct Model {
    pub session: EditSession,
    pub settings: Settings,
    pub filename: String,
    pub highlighter: SyntectHighlighter,
}

impl Model {
    /// A fresh, empty document with default settings.
    pub fn new() -> Self {
        Self::with_document("", DEFAULT_FILENAME.to_string(), Settings::default())
    }

    /// A document restored or opened with known content and settings.
    pub fn with_document(text: &str, filename: String, settings: Settings) -> Self {
        let highlighter = SyntectHighlighter::new(settings.markdown_theme.theme_mode());
        Self {
            session: EditSession::new(text),
            settings,
            filename,
            highlighter,
        }
    }

    /// Characters in the document, for the status bar.
    pub fn char_count(&self) -> usize {
        self.session.buffer().char_count()
    }

    /// Whitespace-separated words in the document.
    pub fn word_count(&self) -> usize {
        self.session.buffer().word_count()
    }

    /// One-based `(line, column)` of the raw cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        self.session.buffer().position()
    }

    /// Whether the document looks like markdown, from its content or its
    /// filename. Drives the export extension and the toggle affordance.
    pub fn markdown_detected(&self) -> bool {
        detect::is_markdown_text(&self.session.buffer_text())
            || self.filename.to_lowercase().ends_with(".md")
    }

    /// Container class the host applies to the rendered surface.
    pub fn markup_class(&self) -> &'static str {
        self.settings.markdown_theme.class_name()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the render configuration for one render or serialize call.
///
/// A free function over the two fields it needs, so callers can keep a
/// mutable borrow of the session alive at the same time.
pub fn render_config<'a>(
    settings: &Settings,
    highlighter: &'a SyntectHighlighter,
) -> RenderConfig<'a> {
    RenderConfig {
        syntax_highlighting: settings.syntax_highlighting,
        highlighter: Some(highlighter),
    }
}
