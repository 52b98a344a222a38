use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::highlight::ThemeMode;

/// Line wrapping in the raw editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    #[default]
    Soft,
    Off,
}

/// Application chrome theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Styling of the rendered markdown surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkdownTheme {
    #[default]
    Light,
    Dark,
    Github,
    Solarized,
}

impl MarkdownTheme {
    /// Container class name the host applies to the rendered surface.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "dark-theme",
            Self::Github => "github-theme",
            Self::Solarized => "solarized-theme",
        }
    }

    /// Which half of the highlighting theme catalog goes with this look.
    pub const fn theme_mode(self) -> ThemeMode {
        match self {
            Self::Light | Self::Github => ThemeMode::Light,
            Self::Dark | Self::Solarized => ThemeMode::Dark,
        }
    }
}

/// User settings, persisted as one JSON object.
///
/// Field names serialize in camelCase, the shape the settings object has
/// always had on disk. Unknown fields are ignored and missing fields fall
/// back to defaults, so older stores load cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub ui_font: String,
    pub note_font: String,
    pub font_size: u32,
    pub line_height: f32,
    pub wrap: WrapMode,
    pub theme: Theme,
    /// Background override as a CSS color, empty for the theme default.
    pub bg_color: String,
    /// Text color override, empty for the theme default.
    pub text_color: String,
    /// Either `"tab"` or a number of spaces, kept as a string on disk.
    pub tab_size: String,
    pub markdown_theme: MarkdownTheme,
    pub syntax_highlighting: bool,
    pub auto_preview_md: bool,
    pub preview_font_size: u32,
    /// Whether the session was last left in rendered editing.
    pub markdown_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui_font: "Inter".to_string(),
            note_font: "JetBrains Mono".to_string(),
            font_size: 16,
            line_height: 1.5,
            wrap: WrapMode::Soft,
            theme: Theme::Light,
            bg_color: String::new(),
            text_color: String::new(),
            tab_size: "4".to_string(),
            markdown_theme: MarkdownTheme::Light,
            syntax_highlighting: true,
            auto_preview_md: true,
            preview_font_size: 16,
            markdown_enabled: false,
        }
    }
}

impl Settings {
    /// Parse the persisted JSON form, merging missing fields over defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse settings JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize settings")
    }

    /// The text a Tab keystroke inserts: a literal tab, or N spaces.
    pub fn tab_insert_text(&self) -> String {
        if self.tab_size == "tab" {
            "\t".to_string()
        } else {
            let n = self.tab_size.parse::<usize>().unwrap_or(4);
            " ".repeat(n)
        }
    }
}

/// Per-OS directory for the persistent store.
pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("quillpad");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("quillpad");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("quillpad");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("quillpad");
        }
    }

    PathBuf::from(".quillpad")
}
