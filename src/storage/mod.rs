//! Persistent key-value store.
//!
//! A file-per-key store under the config directory: small string values,
//! read once at startup, rewritten on every content or settings change.
//! Callers treat writes as best-effort; the store itself reports errors
//! and leaves the decision to them.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Key for the raw note text.
pub const KEY_CONTENT: &str = "content";
/// Key for the current filename.
pub const KEY_FILENAME: &str = "filename";
/// Key for the settings JSON object.
pub const KEY_SETTINGS: &str = "settings";

/// Handle to a store directory. Cheap to create, no open file handles.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open a store at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open the per-user store at the platform config location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::config::global_config_path())
    }

    /// Read a value, `None` when the key was never written.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.dir.join(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Write a value, replacing any previous one.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.dir.join(key);
        fs::write(&path, value).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Delete a key. Deleting an absent key is fine.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.dir.join(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}
