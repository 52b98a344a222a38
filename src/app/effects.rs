//! Side effects around the pure update: persistence, import, export.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::markdown::detect;
use crate::storage::{KEY_CONTENT, KEY_FILENAME, KEY_SETTINGS};

use super::model::DEFAULT_FILENAME;
use super::{App, Message};

/// A document prepared for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Why opening a file failed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid UTF-8")]
    InvalidEncoding,
}

/// What a message changes in the persistent store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Persist {
    Nothing,
    Document,
    Settings,
    /// Opening a file can also auto-enable the rendered surface.
    DocumentAndSettings,
}

impl Persist {
    const fn document(self) -> bool {
        matches!(self, Self::Document | Self::DocumentAndSettings)
    }

    const fn settings(self) -> bool {
        matches!(self, Self::Settings | Self::DocumentAndSettings)
    }
}

/// Classify a message before it is consumed by the update.
pub(super) fn persistence_for(msg: &Message) -> Persist {
    match msg {
        Message::InsertChar(_)
        | Message::InsertTab
        | Message::InsertNewline
        | Message::DeleteBack
        | Message::DeleteForward
        | Message::PreviewEdit { .. }
        | Message::NewFile => Persist::Document,
        Message::OpenFile { .. } => Persist::DocumentAndSettings,
        Message::ToggleMarkdown | Message::ApplySettings(_) => Persist::Settings,
        _ => Persist::Nothing,
    }
}

impl App {
    /// Write what the last message changed back to the store.
    ///
    /// Best-effort: a failed write is logged and the session keeps going,
    /// the next change retries anyway.
    pub(super) fn run_persistence(&self, what: Persist) {
        if what.document() {
            let text = self.model.session.buffer_text();
            if let Err(err) = self.store.set(KEY_CONTENT, &text) {
                warn!(%err, "failed to persist content");
            }
            if let Err(err) = self.store.set(KEY_FILENAME, &self.model.filename) {
                warn!(%err, "failed to persist filename");
            }
        }
        if what.settings() {
            match self.model.settings.to_json() {
                Ok(json) => {
                    if let Err(err) = self.store.set(KEY_SETTINGS, &json) {
                        warn!(%err, "failed to persist settings");
                    }
                }
                Err(err) => warn!(%err, "failed to serialize settings"),
            }
        }
    }

    /// The current document, named and typed for download.
    ///
    /// Markdown-looking documents go out as `.md` with a markdown MIME
    /// type, everything else keeps its name and plain text.
    pub fn export(&self) -> ExportFile {
        let text = self.model.session.buffer_text();
        let (name, mime) = detect::export_disposition(&self.model.filename, &text);
        ExportFile {
            name,
            mime,
            bytes: text.into_bytes(),
        }
    }
}

/// Read a file from disk into the `(name, content)` pair that
/// [`Message::OpenFile`] carries.
pub fn read_import(path: &Path) -> Result<(String, String), ImportError> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|_| ImportError::InvalidEncoding)?;
    let name = path.file_name().map_or_else(
        || DEFAULT_FILENAME.to_string(),
        |n| n.to_string_lossy().into_owned(),
    );
    Ok((name, content))
}
