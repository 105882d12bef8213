//! Pass-through settings for the checker.
//!
//! Settings are read from an optional `env-guard.toml` in the working
//! directory; a missing file means defaults. Nothing is ever written back.
//! The three `check_on_*` triggers are plain data for whatever schedules
//! checks (an editor integration, a git hook); the CLI itself runs exactly
//! once per invocation.

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "env-guard.toml";

const DEFAULT_TEMPLATE_FILE: &str = ".env.example";
const DEFAULT_ENV_FILE: &str = ".env";

/// Checker configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Template file name, resolved against the working directory.
  pub template_file: String,
  /// Env file name, resolved against the working directory.
  pub env_file: String,
  /// Regex patterns; matching keys are never reported as missing.
  pub ignore_patterns: Vec<String>,
  pub check_on_open: bool,
  pub check_on_save: bool,
  pub check_on_branch_switch: bool,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      template_file: String::from(DEFAULT_TEMPLATE_FILE),
      env_file: String::from(DEFAULT_ENV_FILE),
      ignore_patterns: Vec::new(),
      check_on_open: true,
      check_on_save: true,
      check_on_branch_switch: true,
    }
  }
}

impl Settings {
  /// Loads settings from `env-guard.toml` in `dir`, falling back to defaults
  /// when the file doesn't exist.
  pub fn load_from<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
    let path = dir.as_ref().join(CONFIG_FILE_NAME);

    match std::fs::read_to_string(&path) {
      Ok(text) => toml::from_str(&text).map_err(|error| ConfigError::Parse(path, error)),
      Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
      Err(error) => Err(ConfigError::Io(path, error)),
    }
  }
}

/// Errors that can occur while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// Error reading the config file
  #[error("Config file IO error for {0}: {1}")]
  Io(PathBuf, std::io::Error),
  /// Error parsing the config file
  #[error("Config file parse error for {0}: {1}")]
  Parse(PathBuf, toml::de::Error),
}
