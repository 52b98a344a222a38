//! The raw text buffer behind both editing views.
//!
//! A rope-backed buffer with cursor management. The edit session keeps it
//! authoritative: rendered-view edits are serialized back into it before
//! anything else reads the document.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
