//! Configuration file support for podcast-catalog.
//!
//! This module provides functionality for loading and saving user preferences
//! from a TOML configuration file.

use crate::error::{AppError, Result};
use crate::types::{GenreFilter, SortOrder};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// User configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Initial genre filter: "all" or a genre id
    #[serde(default)]
    pub genre: GenreFilter,

    /// Initial sort order: "most-recent" or "oldest"
    #[serde(default)]
    pub sort: SortOrder,

    /// Key bindings for the TUI
    #[serde(default)]
    pub keybindings: Keybindings,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self {
            genre: GenreFilter::All,
            sort: SortOrder::MostRecent,
            keybindings: Keybindings::default(),
        }
    }

    /// Get the path to the config file.
    ///
    /// Returns ~/.config/podcast-catalog/config.toml on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("podcast-catalog");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    /// Parse a config document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.keybindings.validate()?;
        Ok(config)
    }

    /// Save config to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Create a default config file if one doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn create_default_if_missing() -> Result<PathBuf> {
        let path = Self::get_config_path()?;

        if !path.exists() {
            let config = Self::new();
            config.save()?;
        }

        Ok(path)
    }
}

/// Key bindings, each action mapped to a list of key names.
///
/// Key names are single characters ("j", "?") or one of: Up, Down, Left,
/// Right, Enter, Esc, Tab, BackTab, Backspace, Space, PageUp, PageDown,
/// Home, End.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub select: Vec<String>,
    pub close: Vec<String>,
    pub toggle_focus: Vec<String>,
    pub sort: Vec<String>,
    pub help: Vec<String>,
    pub quit: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            up: keys(&["k", "Up"]),
            down: keys(&["j", "Down"]),
            select: keys(&["Enter"]),
            close: keys(&["Esc", "x"]),
            toggle_focus: keys(&["Tab", "BackTab"]),
            sort: keys(&["o"]),
            help: keys(&["?"]),
            quit: keys(&["q"]),
        }
    }
}

/// Parse a key name into a crossterm key code.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Tab" => KeyCode::Tab,
        "BackTab" => KeyCode::BackTab,
        "Backspace" => KeyCode::Backspace,
        "Space" => KeyCode::Char(' '),
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

impl Keybindings {
    /// Whether a key event matches any key of a binding.
    ///
    /// Keys pressed with Ctrl or Alt never match; those are reserved for
    /// global shortcuts.
    pub fn matches(&self, binding: &[String], key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        binding
            .iter()
            .filter_map(|name| parse_key(name))
            .any(|code| code == key.code)
    }

    /// Reject key names that cannot be parsed.
    pub fn validate(&self) -> Result<()> {
        let all = [
            &self.up,
            &self.down,
            &self.select,
            &self.close,
            &self.toggle_focus,
            &self.sort,
            &self.help,
            &self.quit,
        ];
        for name in all.into_iter().flatten() {
            if parse_key(name).is_none() {
                return Err(AppError::Config(format!("unknown key name '{}'", name)));
            }
        }
        Ok(())
    }

    /// First key name of a binding, for footer hints.
    pub fn hint<'a>(&self, binding: &'a [String]) -> &'a str {
        binding.first().map(String::as_str).unwrap_or("?")
    }
}
