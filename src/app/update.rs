//! Messages and the pure state transition.

use crate::config::Settings;
use crate::editor::Direction;
use crate::highlight::SyntectHighlighter;
use crate::session::Mode;

use super::model::{DEFAULT_FILENAME, Model, render_config};

/// Everything the host surface can report.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // --- Raw editing ---
    /// Insert a character at the cursor.
    InsertChar(char),
    /// Insert the configured tab text (Tab key).
    InsertTab,
    /// Split the current line (Enter key).
    InsertNewline,
    /// Delete the character before the cursor (Backspace).
    DeleteBack,
    /// Delete the character at the cursor (Delete key).
    DeleteForward,

    // --- Raw cursor movement ---
    /// Move the cursor one step.
    MoveCursor(Direction),
    /// Jump to the beginning of the line (Home).
    MoveLineStart,
    /// Jump to the end of the line (End).
    MoveLineEnd,
    /// Jump one word left (Ctrl+Left).
    MoveWordLeft,
    /// Jump one word right (Ctrl+Right).
    MoveWordRight,
    /// Jump to the start of the document (Ctrl+Home).
    MoveDocStart,
    /// Jump to the end of the document (Ctrl+End).
    MoveDocEnd,
    /// Place the cursor at an absolute position (mouse click).
    MoveTo { line: usize, col: usize },

    // --- Rendered surface ---
    /// Flip between raw and rendered editing.
    ToggleMarkdown,
    /// The rendered surface content changed under direct editing.
    PreviewEdit {
        markup: String,
        cursor: usize,
        scroll: f64,
    },
    /// The cursor moved on the rendered surface, no content change.
    PreviewCursor(usize),
    /// The rendered surface scrolled.
    PreviewScroll(f64),

    // --- Files ---
    /// Replace the document with an opened file.
    OpenFile { name: String, content: String },
    /// Clear the editor and start over.
    NewFile,

    // --- Settings ---
    /// Install a new settings object.
    ApplySettings(Settings),
}

/// Pure function that advances the model by one message.
///
/// Raw editing and movement messages only apply while the raw surface is
/// active; the rendered surface reports its own edits as
/// [`Message::PreviewEdit`]. No side effects here, persistence happens in
/// the [`App`](super::App) around each dispatch.
pub fn update(mut model: Model, msg: Message) -> Model {
    let raw_mode = model.session.mode() == Mode::RawEditing;

    match msg {
        // --- Raw editing ---
        Message::InsertChar(ch) if raw_mode => {
            model.session.buffer_mut().insert_char(ch);
        }
        Message::InsertTab if raw_mode => {
            let text = model.settings.tab_insert_text();
            model.session.buffer_mut().insert_str(&text);
        }
        Message::InsertNewline if raw_mode => {
            model.session.buffer_mut().split_line();
        }
        Message::DeleteBack if raw_mode => {
            model.session.buffer_mut().delete_back();
        }
        Message::DeleteForward if raw_mode => {
            model.session.buffer_mut().delete_forward();
        }

        // --- Raw cursor movement ---
        Message::MoveCursor(direction) if raw_mode => {
            model.session.buffer_mut().move_cursor(direction);
        }
        Message::MoveLineStart if raw_mode => {
            model.session.buffer_mut().move_home();
        }
        Message::MoveLineEnd if raw_mode => {
            model.session.buffer_mut().move_end();
        }
        Message::MoveWordLeft if raw_mode => {
            model.session.buffer_mut().move_word_left();
        }
        Message::MoveWordRight if raw_mode => {
            model.session.buffer_mut().move_word_right();
        }
        Message::MoveDocStart if raw_mode => {
            model.session.buffer_mut().move_to_start();
        }
        Message::MoveDocEnd if raw_mode => {
            model.session.buffer_mut().move_to_end();
        }
        Message::MoveTo { line, col } if raw_mode => {
            model.session.buffer_mut().move_to(line, col);
        }

        // --- Rendered surface ---
        Message::ToggleMarkdown => {
            let config = render_config(&model.settings, &model.highlighter);
            model.session.toggle_mode(&config);
            model.settings.markdown_enabled = model.session.mode() == Mode::RenderedEditing;
        }
        Message::PreviewEdit {
            markup,
            cursor,
            scroll,
        } => {
            let config = render_config(&model.settings, &model.highlighter);
            model
                .session
                .apply_rendered_edit(&markup, cursor, scroll, &config);
        }
        Message::PreviewCursor(cursor) => model.session.set_cursor_mark(cursor),
        Message::PreviewScroll(scroll) => model.session.set_scroll_mark(scroll),

        // --- Files ---
        Message::OpenFile { name, content } => {
            model.session.buffer_mut().set_text(&content);
            model.filename = name;
            let config = render_config(&model.settings, &model.highlighter);
            if model.session.mode() == Mode::RenderedEditing {
                // The rendered surface stays up, showing the new document.
                model.session.refresh(&config);
            } else if model.settings.auto_preview_md
                && model.filename.to_lowercase().ends_with(".md")
            {
                model.session.toggle_mode(&config);
                model.settings.markdown_enabled = true;
            }
        }
        Message::NewFile => {
            model.session.buffer_mut().set_text("");
            model.filename = DEFAULT_FILENAME.to_string();
            let config = render_config(&model.settings, &model.highlighter);
            model.session.refresh(&config);
        }

        // --- Settings ---
        Message::ApplySettings(settings) => {
            model.settings = settings;
            // markdown_enabled mirrors the live mode; only startup reads it
            // the other way around.
            model.settings.markdown_enabled = model.session.mode() == Mode::RenderedEditing;
            model.highlighter = SyntectHighlighter::new(model.settings.markdown_theme.theme_mode());
            let config = render_config(&model.settings, &model.highlighter);
            model.session.refresh(&config);
        }

        // A raw-editing message arrived while the rendered surface was
        // active; drop it.
        _ => {}
    }

    model
}
