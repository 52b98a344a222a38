//! The edit session: one buffer, two surfaces, and the round trip
//! between them.
//!
//! The session owns the authoritative [`EditorBuffer`] and decides when to
//! run the renderer or the serializer. Edits on the rendered surface pay a
//! full synchronous round trip per keystroke: serialize the edited markup
//! back into the buffer, then re-render from the buffer. Replacing the
//! rendered markup destroys any live cursor or scroll state in the host
//! surface, so both are captured as marks before the rebuild and re-applied
//! after it.

use tracing::debug;

use crate::editor::EditorBuffer;
use crate::markdown::{RenderConfig, flatten_text, render, serialize};

/// Which surface is authoritative for user input right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keystrokes mutate the raw buffer directly; nothing is rendered.
    #[default]
    RawEditing,
    /// Edits land on the rendered surface and round-trip through the
    /// serializer.
    RenderedEditing,
}

/// Coordinator for a single open document.
#[derive(Debug)]
pub struct EditSession {
    buffer: EditorBuffer,
    mode: Mode,
    /// Markup last installed on the rendered surface. Stale while in
    /// [`Mode::RawEditing`]; rebuilt on every transition in.
    markup: String,
    /// Characters preceding the cursor in the flattened markup text.
    cursor_mark: usize,
    /// Vertical scroll offset of the rendered surface.
    scroll_mark: f64,
    /// Re-entrancy guard around render and serialize. Installing markup
    /// can echo back as an edit notification from the host surface; those
    /// echoes must be ignored, not round-tripped.
    busy: bool,
}

impl EditSession {
    /// Open a session over `text`, starting in raw mode.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: EditorBuffer::from_text(text),
            mode: Mode::default(),
            markup: String::new(),
            cursor_mark: 0,
            scroll_mark: 0.0,
            busy: false,
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The markup currently installed on the rendered surface.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub const fn cursor_mark(&self) -> usize {
        self.cursor_mark
    }

    pub const fn scroll_mark(&self) -> f64 {
        self.scroll_mark
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// The authoritative raw text.
    pub fn buffer_text(&self) -> String {
        self.buffer.text()
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    /// Direct buffer access for raw-mode keystrokes.
    pub const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        &mut self.buffer
    }

    /// Flip between raw and rendered editing.
    ///
    /// Into rendered mode: render the buffer, install the markup, and park
    /// the cursor at document end. Into raw mode: the buffer is already
    /// authoritative, so only the mode changes. Ignored while busy.
    pub fn toggle_mode(&mut self, config: &RenderConfig) {
        if self.busy {
            return;
        }
        match self.mode {
            Mode::RawEditing => {
                self.busy = true;
                self.markup = render(&self.buffer.text(), config);
                self.cursor_mark = flatten_text(&self.markup).chars().count();
                self.busy = false;
                self.mode = Mode::RenderedEditing;
                debug!(chars = self.cursor_mark, "entered rendered editing");
            }
            Mode::RenderedEditing => {
                self.mode = Mode::RawEditing;
                debug!("entered raw editing");
            }
        }
    }

    /// Apply an edit made directly on the rendered surface.
    ///
    /// `markup` is the surface content after the edit, `cursor` and
    /// `scroll` are the marks captured before this call. The edited markup
    /// is serialized back into the buffer, then re-rendered; the cursor
    /// mark is re-anchored into the new flattened text, falling back to
    /// document end when it no longer fits. Returns `false` when the edit
    /// was ignored (wrong mode, or a render already in flight).
    pub fn apply_rendered_edit(
        &mut self,
        markup: &str,
        cursor: usize,
        scroll: f64,
        config: &RenderConfig,
    ) -> bool {
        if self.busy || self.mode != Mode::RenderedEditing {
            return false;
        }
        self.busy = true;
        self.cursor_mark = cursor;
        self.scroll_mark = scroll;

        let raw = serialize(markup);
        self.buffer.set_text(&raw);
        self.markup = render(&raw, config);

        let flat_len = flatten_text(&self.markup).chars().count();
        self.cursor_mark = self.cursor_mark.min(flat_len);
        self.busy = false;
        debug!(
            raw_chars = raw.chars().count(),
            cursor = self.cursor_mark,
            "rendered edit round trip"
        );
        true
    }

    /// Re-render the current buffer in place, preserving marks.
    ///
    /// Used when something other than an edit changed how the document
    /// should look, e.g. new settings. No-op in raw mode or while busy.
    pub fn refresh(&mut self, config: &RenderConfig) -> bool {
        if self.busy || self.mode != Mode::RenderedEditing {
            return false;
        }
        self.busy = true;
        self.markup = render(&self.buffer.text(), config);
        let flat_len = flatten_text(&self.markup).chars().count();
        self.cursor_mark = self.cursor_mark.min(flat_len);
        self.busy = false;
        true
    }

    /// Record a cursor move on the rendered surface (no content change).
    pub const fn set_cursor_mark(&mut self, cursor: usize) {
        self.cursor_mark = cursor;
    }

    /// Record a scroll of the rendered surface (no content change).
    pub const fn set_scroll_mark(&mut self, scroll: f64) {
        self.scroll_mark = scroll;
    }

    #[cfg(test)]
    const fn force_busy(&mut self, busy: bool) {
        self.busy = busy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RenderConfig<'static> {
        RenderConfig::default()
    }

    #[test]
    fn test_new_session_starts_raw() {
        let session = EditSession::new("hello");
        assert_eq!(session.mode(), Mode::RawEditing);
        assert_eq!(session.markup(), "");
        assert_eq!(session.buffer_text(), "hello");
    }

    #[test]
    fn test_toggle_renders_and_parks_cursor_at_end() {
        let mut session = EditSession::new("# Title\n\nHello **world**");
        session.toggle_mode(&config());

        assert_eq!(session.mode(), Mode::RenderedEditing);
        assert!(session.markup().contains("<h1>Title</h1>"));
        let flat = flatten_text(session.markup());
        assert_eq!(session.cursor_mark(), flat.chars().count());
    }

    #[test]
    fn test_toggle_out_leaves_buffer_untouched() {
        let mut session = EditSession::new("# Title");
        session.toggle_mode(&config());
        session.toggle_mode(&config());

        assert_eq!(session.mode(), Mode::RawEditing);
        assert_eq!(session.buffer_text(), "# Title");
    }

    #[test]
    fn test_toggle_out_and_in_reproduces_markup() {
        let mut session = EditSession::new("# Title\n\nsome *notes*");
        session.toggle_mode(&config());
        let first = session.markup().to_string();

        session.toggle_mode(&config());
        session.toggle_mode(&config());
        assert_eq!(session.markup(), first);
    }

    #[test]
    fn test_rendered_edit_round_trips_to_buffer() {
        let mut session = EditSession::new("Hello **world**");
        session.toggle_mode(&config());

        // The host inserted "!" after "Hello" and reports the surface
        // content plus the cursor just past the insertion.
        let edited = "<p>Hello! <strong>world</strong></p>";
        let applied = session.apply_rendered_edit(edited, 6, 0.0, &config());

        assert!(applied);
        assert_eq!(session.buffer_text(), "Hello! **world**");
        assert_eq!(session.markup(), "<p>Hello! <strong>world</strong></p>");
        assert_eq!(session.cursor_mark(), 6);
    }

    #[test]
    fn test_rendered_edit_ignored_in_raw_mode() {
        let mut session = EditSession::new("hello");
        let applied = session.apply_rendered_edit("<p>bye</p>", 0, 0.0, &config());

        assert!(!applied);
        assert_eq!(session.buffer_text(), "hello");
    }

    #[test]
    fn test_rendered_edit_ignored_while_busy() {
        let mut session = EditSession::new("hello");
        session.toggle_mode(&config());
        session.force_busy(true);

        let applied = session.apply_rendered_edit("<p>bye</p>", 0, 0.0, &config());
        assert!(!applied);
        assert_eq!(session.buffer_text(), "hello");
        session.force_busy(false);
    }

    #[test]
    fn test_toggle_ignored_while_busy() {
        let mut session = EditSession::new("hello");
        session.force_busy(true);
        session.toggle_mode(&config());
        assert_eq!(session.mode(), Mode::RawEditing);
    }

    #[test]
    fn test_cursor_mark_falls_back_to_document_end() {
        let mut session = EditSession::new("short");
        session.toggle_mode(&config());

        session.apply_rendered_edit("<p>hi</p>", 999, 0.0, &config());
        assert_eq!(session.cursor_mark(), 2);
    }

    #[test]
    fn test_scroll_mark_survives_round_trip() {
        let mut session = EditSession::new("a\n\nb");
        session.toggle_mode(&config());

        session.apply_rendered_edit("<p>a</p><p>bc</p>", 3, 120.5, &config());
        assert!((session.scroll_mark() - 120.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_refresh_rerenders_with_new_config() {
        let mut session = EditSession::new("```js\nlet x = 1;\n```");
        let plain = RenderConfig {
            syntax_highlighting: false,
            highlighter: None,
        };
        session.toggle_mode(&plain);
        assert!(!session.markup().contains("language-js"));

        assert!(session.refresh(&config()));
        assert!(session.markup().contains("language-js"));
    }

    #[test]
    fn test_refresh_is_noop_in_raw_mode() {
        let mut session = EditSession::new("# hi");
        assert!(!session.refresh(&config()));
        assert_eq!(session.markup(), "");
    }

    #[test]
    fn test_raw_edits_do_not_render() {
        let mut session = EditSession::new("hello");
        session.buffer_mut().insert_char('!');
        assert_eq!(session.markup(), "");
        assert_eq!(session.buffer_text(), "!hello");
    }

    #[test]
    fn test_mark_setters_record_host_state() {
        let mut session = EditSession::new("hello");
        session.set_cursor_mark(3);
        session.set_scroll_mark(42.0);
        assert_eq!(session.cursor_mark(), 3);
        assert!((session.scroll_mark() - 42.0).abs() < f64::EPSILON);
    }
}
