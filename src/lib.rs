// Transitive dependency version mismatches we can't control
#![allow(clippy::multiple_crate_versions)]

//! # Quillpad
//!
//! A markdown notepad engine with a live, directly-editable preview.
//!
//! One raw text buffer stays authoritative and is projected onto two
//! surfaces:
//! - a raw editing surface over the buffer itself
//! - a rendered markup surface that can be edited directly, with every
//!   edit serialized back into the buffer before anything else reads it
//!
//! ## Architecture
//!
//! The app layer follows The Elm Architecture (TEA) pattern:
//! - **Model**: application state
//! - **Message**: events the host surface reports
//! - **Update**: pure state transitions
//!
//! The host draws from the model; persistence runs around each dispatch.
//!
//! ## Modules
//!
//! - [`app`]: model, messages, update loop, persistence effects
//! - [`editor`]: the rope-backed raw buffer
//! - [`session`]: mode switching and the render/serialize round trip
//! - [`markdown`]: rendering, serializing, and markdown detection
//! - [`highlight`]: syntax highlighting for fenced code blocks
//! - [`config`]: user settings
//! - [`storage`]: the persistent key-value store

pub mod app;
pub mod config;
pub mod editor;
pub mod highlight;
pub mod markdown;
pub mod perf;
pub mod session;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::config::Settings;
    pub use crate::session::{EditSession, Mode};
    pub use crate::storage::Store;
}
