//! Application state and the update loop around it.
//!
//! An Elm-style split:
//! - [`Model`]: the complete application state
//! - [`Message`]: everything the host surface can report
//! - [`update`]: pure function for state transitions
//! - [`App`]: owns the model and the persistent store, runs side effects
//!   around each dispatch

mod effects;
mod model;
mod update;

pub use effects::{ExportFile, ImportError, read_import};
pub use model::{DEFAULT_FILENAME, Model};
pub use update::{Message, update};

use tracing::warn;

use crate::config::Settings;
use crate::storage::{KEY_CONTENT, KEY_FILENAME, KEY_SETTINGS, Store};

/// The application: one model, one store.
///
/// Hosts feed user input in through [`dispatch`](Self::dispatch) and read
/// the [`Model`] back out to draw. Every dispatch persists whatever the
/// message changed, the way the session should survive a restart.
pub struct App {
    store: Store,
    model: Model,
}

impl App {
    /// Start with a fresh document, ignoring anything persisted.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            model: Model::new(),
        }
    }

    /// Start from whatever the store holds: content, filename, settings,
    /// and the editing mode the last session ended in.
    pub fn load(store: Store) -> Self {
        let settings = match store.get(KEY_SETTINGS) {
            Ok(Some(json)) => Settings::from_json(&json).unwrap_or_else(|err| {
                warn!(%err, "ignoring malformed persisted settings");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!(%err, "failed to read persisted settings");
                Settings::default()
            }
        };

        let content = match store.get(KEY_CONTENT) {
            Ok(content) => content.unwrap_or_default(),
            Err(err) => {
                warn!(%err, "failed to read persisted content");
                String::new()
            }
        };

        let filename = match store.get(KEY_FILENAME) {
            Ok(Some(name)) if !name.is_empty() => name,
            Ok(_) => DEFAULT_FILENAME.to_string(),
            Err(err) => {
                warn!(%err, "failed to read persisted filename");
                DEFAULT_FILENAME.to_string()
            }
        };

        let mut model = Model::with_document(&content, filename, settings);
        if model.settings.markdown_enabled {
            model = update(model, Message::ToggleMarkdown);
        }
        Self { store, model }
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Run one message through the update loop and persist the result.
    pub fn dispatch(&mut self, msg: Message) {
        let persist = effects::persistence_for(&msg);
        let model = std::mem::take(&mut self.model);
        self.model = update(model, msg);
        self.run_persistence(persist);
    }
}

#[cfg(test)]
mod tests;
