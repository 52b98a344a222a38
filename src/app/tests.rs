use std::fs;

use tempfile::tempdir;

use crate::config::{MarkdownTheme, Settings};
use crate::editor::Direction;
use crate::session::Mode;
use crate::storage::{KEY_CONTENT, KEY_FILENAME, KEY_SETTINGS, Store};

use super::{App, DEFAULT_FILENAME, Message, Model, read_import, update};

fn model_with(text: &str) -> Model {
    Model::with_document(text, DEFAULT_FILENAME.to_string(), Settings::default())
}

// --- Raw editing ---

#[test]
fn test_new_model_is_a_fresh_document() {
    let model = Model::new();
    assert_eq!(model.session.mode(), Mode::RawEditing);
    assert_eq!(model.session.buffer_text(), "");
    assert_eq!(model.filename, DEFAULT_FILENAME);
}

#[test]
fn test_insert_char_types_into_buffer() {
    let model = model_with("");
    let model = update(model, Message::InsertChar('h'));
    let model = update(model, Message::InsertChar('i'));
    assert_eq!(model.session.buffer_text(), "hi");
}

#[test]
fn test_insert_tab_uses_configured_width() {
    let settings = Settings {
        tab_size: "2".to_string(),
        ..Settings::default()
    };
    let model = Model::with_document("", DEFAULT_FILENAME.to_string(), settings);
    let model = update(model, Message::InsertTab);
    assert_eq!(model.session.buffer_text(), "  ");
}

#[test]
fn test_insert_tab_can_be_a_literal_tab() {
    let settings = Settings {
        tab_size: "tab".to_string(),
        ..Settings::default()
    };
    let model = Model::with_document("", DEFAULT_FILENAME.to_string(), settings);
    let model = update(model, Message::InsertTab);
    assert_eq!(model.session.buffer_text(), "\t");
}

#[test]
fn test_insert_newline_splits_the_line() {
    let model = model_with("ab");
    let model = update(model, Message::MoveCursor(Direction::Right));
    let model = update(model, Message::InsertNewline);
    assert_eq!(model.session.buffer_text(), "a\nb");
}

#[test]
fn test_delete_back_removes_previous_char() {
    let model = model_with("hi");
    let model = update(model, Message::MoveLineEnd);
    let model = update(model, Message::DeleteBack);
    assert_eq!(model.session.buffer_text(), "h");
}

#[test]
fn test_delete_forward_removes_char_at_cursor() {
    let model = model_with("hi");
    let model = update(model, Message::DeleteForward);
    assert_eq!(model.session.buffer_text(), "i");
}

#[test]
fn test_movement_messages_drive_the_cursor() {
    let model = model_with("hello\nworld");
    let model = update(model, Message::MoveCursor(Direction::Down));
    let model = update(model, Message::MoveLineEnd);
    assert_eq!(model.cursor_position(), (2, 6));

    let model = update(model, Message::MoveDocStart);
    assert_eq!(model.cursor_position(), (1, 1));

    let model = update(model, Message::MoveTo { line: 1, col: 3 });
    assert_eq!(model.cursor_position(), (2, 4));
}

#[test]
fn test_word_movement() {
    let model = model_with("hello world");
    let model = update(model, Message::MoveWordRight);
    assert_eq!(model.cursor_position(), (1, 7));
    let model = update(model, Message::MoveWordLeft);
    assert_eq!(model.cursor_position(), (1, 1));
}

#[test]
fn test_raw_editing_ignored_on_rendered_surface() {
    let model = model_with("hello");
    let model = update(model, Message::ToggleMarkdown);
    let model = update(model, Message::InsertChar('!'));
    let model = update(model, Message::DeleteBack);
    assert_eq!(model.session.buffer_text(), "hello");
}

// --- Mode toggling ---

#[test]
fn test_toggle_markdown_renders_and_flags_settings() {
    let model = model_with("# Title");
    let model = update(model, Message::ToggleMarkdown);

    assert_eq!(model.session.mode(), Mode::RenderedEditing);
    assert!(model.session.markup().contains("<h1>Title</h1>"));
    assert!(model.settings.markdown_enabled);

    let model = update(model, Message::ToggleMarkdown);
    assert_eq!(model.session.mode(), Mode::RawEditing);
    assert!(!model.settings.markdown_enabled);
}

// --- Rendered surface ---

#[test]
fn test_preview_edit_round_trips_to_buffer() {
    let model = model_with("Hello **world**");
    let model = update(model, Message::ToggleMarkdown);
    let model = update(
        model,
        Message::PreviewEdit {
            markup: "<p>Hey <strong>world</strong></p>".to_string(),
            cursor: 3,
            scroll: 10.0,
        },
    );

    assert_eq!(model.session.buffer_text(), "Hey **world**");
    assert_eq!(model.session.cursor_mark(), 3);
    assert!((model.session.scroll_mark() - 10.0).abs() < f64::EPSILON);
}

#[test]
fn test_preview_marks_update_without_content_change() {
    let model = model_with("hello");
    let model = update(model, Message::ToggleMarkdown);
    let model = update(model, Message::PreviewCursor(2));
    let model = update(model, Message::PreviewScroll(33.5));

    assert_eq!(model.session.cursor_mark(), 2);
    assert!((model.session.scroll_mark() - 33.5).abs() < f64::EPSILON);
    assert_eq!(model.session.buffer_text(), "hello");
}

// --- Files ---

#[test]
fn test_open_file_replaces_document() {
    let model = model_with("old");
    let model = update(
        model,
        Message::OpenFile {
            name: "a.txt".to_string(),
            content: "new content".to_string(),
        },
    );
    assert_eq!(model.filename, "a.txt");
    assert_eq!(model.session.buffer_text(), "new content");
    assert_eq!(model.session.mode(), Mode::RawEditing);
}

#[test]
fn test_open_markdown_file_auto_previews() {
    let model = model_with("");
    let model = update(
        model,
        Message::OpenFile {
            name: "Notes.MD".to_string(),
            content: "# hi".to_string(),
        },
    );
    assert_eq!(model.session.mode(), Mode::RenderedEditing);
    assert!(model.session.markup().contains("<h1>hi</h1>"));
    assert!(model.settings.markdown_enabled);
}

#[test]
fn test_auto_preview_respects_setting() {
    let settings = Settings {
        auto_preview_md: false,
        ..Settings::default()
    };
    let model = Model::with_document("", DEFAULT_FILENAME.to_string(), settings);
    let model = update(
        model,
        Message::OpenFile {
            name: "notes.md".to_string(),
            content: "# hi".to_string(),
        },
    );
    assert_eq!(model.session.mode(), Mode::RawEditing);
}

#[test]
fn test_open_file_on_rendered_surface_rerenders_in_place() {
    let model = model_with("# one");
    let model = update(model, Message::ToggleMarkdown);
    let model = update(
        model,
        Message::OpenFile {
            name: "b.txt".to_string(),
            content: "# two".to_string(),
        },
    );
    assert_eq!(model.session.mode(), Mode::RenderedEditing);
    assert!(model.session.markup().contains("<h1>two</h1>"));
}

#[test]
fn test_new_file_clears_everything_but_keeps_the_surface() {
    let model = model_with("# doc");
    let model = update(model, Message::InsertChar('x'));
    let model = update(model, Message::ToggleMarkdown);
    let model = update(model, Message::NewFile);

    assert_eq!(model.session.buffer_text(), "");
    assert_eq!(model.filename, DEFAULT_FILENAME);
    assert_eq!(model.session.mode(), Mode::RenderedEditing);
    assert_eq!(model.session.markup(), "<p></p>");
}

// --- Settings ---

#[test]
fn test_apply_settings_rerenders_the_surface() {
    let plain = Settings {
        syntax_highlighting: false,
        ..Settings::default()
    };
    let model = Model::with_document(
        "```js\nlet x = 1;\n```",
        DEFAULT_FILENAME.to_string(),
        plain,
    );
    let model = update(model, Message::ToggleMarkdown);
    assert!(!model.session.markup().contains("language-js"));

    let model = update(model, Message::ApplySettings(Settings::default()));
    assert!(model.session.markup().contains("language-js"));
}

#[test]
fn test_apply_settings_keeps_mode_flag_honest() {
    let model = model_with("hello");
    let settings = Settings {
        markdown_enabled: true,
        ..Settings::default()
    };
    let model = update(model, Message::ApplySettings(settings));

    assert_eq!(model.session.mode(), Mode::RawEditing);
    assert!(!model.settings.markdown_enabled);
}

#[test]
fn test_apply_settings_switches_highlight_theme() {
    let model = model_with("");
    let settings = Settings {
        markdown_theme: MarkdownTheme::Solarized,
        ..Settings::default()
    };
    let model = update(model, Message::ApplySettings(settings));
    assert_eq!(model.markup_class(), "solarized-theme");
}

// --- Status line ---

#[test]
fn test_status_counts() {
    let model = model_with("one two\nthree");
    assert_eq!(model.char_count(), 13);
    assert_eq!(model.word_count(), 3);
    assert_eq!(model.cursor_position(), (1, 1));
}

#[test]
fn test_markdown_detected_from_content_or_name() {
    assert!(model_with("# heading").markdown_detected());
    assert!(!model_with("plain text").markdown_detected());

    let named = Model::with_document(
        "plain text",
        "notes.md".to_string(),
        Settings::default(),
    );
    assert!(named.markdown_detected());
}

// --- App facade: persistence ---

#[test]
fn test_dispatch_persists_document_edits() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let mut app = App::new(store.clone());

    app.dispatch(Message::InsertChar('a'));
    assert_eq!(store.get(KEY_CONTENT).unwrap().as_deref(), Some("a"));
    assert_eq!(
        store.get(KEY_FILENAME).unwrap().as_deref(),
        Some(DEFAULT_FILENAME)
    );
}

#[test]
fn test_dispatch_persists_settings_on_toggle() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let mut app = App::new(store.clone());

    app.dispatch(Message::ToggleMarkdown);
    let json = store.get(KEY_SETTINGS).unwrap().unwrap();
    assert!(json.contains("\"markdownEnabled\":true"));
}

#[test]
fn test_cursor_motion_does_not_touch_the_store() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    let mut app = App::new(store.clone());

    app.dispatch(Message::MoveCursor(Direction::Right));
    assert_eq!(store.get(KEY_CONTENT).unwrap(), None);
}

#[test]
fn test_load_restores_a_previous_session() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.set(KEY_CONTENT, "# restored").unwrap();
    store.set(KEY_FILENAME, "notes.md").unwrap();

    let app = App::load(store);
    assert_eq!(app.model().session.buffer_text(), "# restored");
    assert_eq!(app.model().filename, "notes.md");
}

#[test]
fn test_load_restores_rendered_mode() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.set(KEY_CONTENT, "# hi").unwrap();
    store
        .set(KEY_SETTINGS, r#"{"markdownEnabled": true}"#)
        .unwrap();

    let app = App::load(store);
    assert_eq!(app.model().session.mode(), Mode::RenderedEditing);
    assert!(app.model().session.markup().contains("<h1>hi</h1>"));
    assert!(app.model().settings.markdown_enabled);
}

#[test]
fn test_load_defaults_on_an_empty_store() {
    let dir = tempdir().unwrap();
    let app = App::load(Store::open(dir.path()).unwrap());
    assert_eq!(app.model().session.buffer_text(), "");
    assert_eq!(app.model().filename, DEFAULT_FILENAME);
    assert_eq!(app.model().settings, Settings::default());
}

#[test]
fn test_load_shrugs_off_malformed_settings() {
    let dir = tempdir().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.set(KEY_SETTINGS, "{not json").unwrap();

    let app = App::load(store);
    assert_eq!(app.model().settings, Settings::default());
}

#[test]
fn test_edit_then_reload_round_trip() {
    let dir = tempdir().unwrap();
    {
        let mut app = App::new(Store::open(dir.path()).unwrap());
        app.dispatch(Message::OpenFile {
            name: "journal.md".to_string(),
            content: "# Day 1".to_string(),
        });
    }
    let app = App::load(Store::open(dir.path()).unwrap());
    assert_eq!(app.model().session.buffer_text(), "# Day 1");
    assert_eq!(app.model().filename, "journal.md");
}

// --- App facade: export and import ---

#[test]
fn test_export_renames_detected_markdown() {
    let dir = tempdir().unwrap();
    let mut app = App::new(Store::open(dir.path()).unwrap());
    app.dispatch(Message::OpenFile {
        name: "notes.txt".to_string(),
        content: "# heading".to_string(),
    });

    let export = app.export();
    assert_eq!(export.name, "notes.md");
    assert_eq!(export.mime, "text/markdown;charset=utf-8");
    assert_eq!(export.bytes, b"# heading".to_vec());
}

#[test]
fn test_export_keeps_plain_text_as_is() {
    let dir = tempdir().unwrap();
    let mut app = App::new(Store::open(dir.path()).unwrap());
    app.dispatch(Message::OpenFile {
        name: "todo.txt".to_string(),
        content: "buy milk".to_string(),
    });

    let export = app.export();
    assert_eq!(export.name, "todo.txt");
    assert_eq!(export.mime, "text/plain;charset=utf-8");
}

#[test]
fn test_read_import_returns_name_and_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("draft.md");
    fs::write(&path, "# draft").unwrap();

    let (name, content) = read_import(&path).unwrap();
    assert_eq!(name, "draft.md");
    assert_eq!(content, "# draft");
}

#[test]
fn test_read_import_rejects_invalid_utf8() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blob.bin");
    fs::write(&path, [0xffu8, 0xfe, 0x00]).unwrap();

    let err = read_import(&path).unwrap_err();
    assert!(err.to_string().contains("UTF-8"));
}

#[test]
fn test_read_import_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(read_import(&dir.path().join("absent.txt")).is_err());
}
