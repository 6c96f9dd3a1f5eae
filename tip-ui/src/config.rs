//! User settings for the calculator window.
//!
//! Settings live in an optional TOML file; every key has a default so a
//! missing file or a partial file both load cleanly. Command-line flags are
//! applied on top with [`Settings::apply_overrides`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = ".tip-calculator";
const CONFIG_FILE: &str = "config.toml";

/// Window geometry in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 420.0,
            height: 520.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bare level or full `EnvFilter` directive.
    pub log_level: String,
    pub log_stdout: bool,
    pub log_file: Option<PathBuf>,
    pub window: WindowSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_stdout: true,
            log_file: None,
            window: WindowSettings::default(),
        }
    }
}

/// Values from the command line that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub quiet: bool,
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file '{}'", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid settings file '{}'", path.display()))
    }

    /// Loads settings from `path` if given, otherwise from [`Settings::default_path`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load_from(&Self::default_path()?),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }

    /// The settings file under the user's home directory.
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        Ok(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn apply_overrides(
        &mut self,
        overrides: SettingsOverrides,
    ) {
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if let Some(file) = overrides.log_file {
            self.log_file = Some(file);
        }
        if overrides.quiet {
            self.log_stdout = false;
        }
    }
}
