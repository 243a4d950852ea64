//! Loads user settings from a `config.toml` file.
use anyhow::{Context, Result};
use log::debug;
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};


pub const DEFAULT_PROMPT: &str = "> ";

/// Every key is optional. Command-line flags take precedence.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Settings {
    /// Prompt shown by the interactive line editor.
    pub prompt: Option<String>,
    /// Whether interactive sessions load and save line history.
    pub history: Option<bool>,
    /// Overrides the history file location.
    pub history_file: Option<PathBuf>,
    /// Skip the end-of-session stack printout.
    pub quiet: Option<bool>,
}

impl Settings {
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }

    pub fn history(&self) -> bool {
        self.history.unwrap_or(true)
    }

    pub fn quiet(&self) -> bool {
        self.quiet.unwrap_or(false)
    }
}

pub fn load_settings_str(config: &str) -> Result<Settings> {
    let s: Settings = toml::from_str(config)?;
    Ok(s)
}

/// Reads the settings file. An explicitly named file must exist; the default
/// file is optional.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let (path, required) = match explicit {
        Some(path) => (path.to_path_buf(), true),
        None => match default_settings_file() {
            Some(path) => (path, false),
            None => return Ok(Settings::default()),
        },
    };

    if !required && !path.exists() {
        debug!("no settings file at {}", path.display());
        return Ok(Settings::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read settings file {}", path.display()))?;
    let settings = load_settings_str(&text)
        .with_context(|| format!("invalid settings file {}", path.display()))?;
    debug!("loaded settings from {}: {:?}", path.display(), settings);
    Ok(settings)
}

fn default_settings_file() -> Option<PathBuf> {
    crate::history::base_dir("XDG_CONFIG_HOME", ".config")
        .ok()
        .map(|dir| dir.join("bits").join("config.toml"))
}
