//! Drift check between a template file and the actual env file.
//!
//! This module is the file-reading shell around the pure core in
//! [`crate::parse`] and [`crate::diff`]:
//!
//! 1. A missing template file skips the check entirely; the core is never
//!    invoked.
//! 2. A missing env file is read as empty text, so every template key counts
//!    as missing.
//! 3. Both texts are parsed and diffed with the configured ignore patterns.
//!
//! It also appends remediation results back to the env file: accepted values
//! as `KEY=value` lines, skipped keys as commented-out `# KEY=` placeholders.
//!
//! # Examples
//!
//! ```rust,no_run
//! use env_guard::check::{CheckOptions, EnvCheck};
//! use std::path::PathBuf;
//!
//! let options = CheckOptions {
//!     env_file: None, // defaults to .env
//!     template_file: PathBuf::from(".env.example"),
//!     ignore_patterns: vec![String::from("^OPTIONAL_")],
//! };
//!
//! let outcome = EnvCheck::check_with_options(options).unwrap();
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

use crate::diff;
use crate::parse::{EnvEntry, EnvFile};

const DEFAULT_ENV_FILENAME: &str = ".env";

/// Main drift-check service for environment files.
pub struct EnvCheck;

impl EnvCheck {
  /// Runs a drift check using the provided options.
  ///
  /// Returns [`CheckOutcome::TemplateMissing`] without touching the env file
  /// when the template doesn't exist.
  pub fn check_with_options(options: CheckOptions) -> Result<CheckOutcome, EnvCheckError> {
    #[cfg(feature = "tracing")]
    info!("Starting env check");

    let CheckOptions {
      env_file,
      template_file,
      ignore_patterns,
    } = options;

    let env_path = env_file.unwrap_or_else(|| {
      std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DEFAULT_ENV_FILENAME)
    });

    #[cfg(feature = "tracing")]
    debug!(?env_path, ?template_file, "Resolved file paths");

    if !template_file.exists() {
      #[cfg(feature = "tracing")]
      debug!("Template file not found, skipping check");
      return Ok(CheckOutcome::TemplateMissing(template_file));
    }

    let template_str = std::fs::read_to_string(&template_file).map_err(EnvCheckError::TemplateIo)?;
    let env_str = match std::fs::read_to_string(&env_path) {
      Ok(content) => content,
      Err(error) if error.kind() == std::io::ErrorKind::NotFound => String::new(),
      Err(error) => return Err(EnvCheckError::EnvIo(error)),
    };

    let template = EnvFile::parse(&template_str);
    let actual = EnvFile::parse(&env_str);

    let missing = diff::find_missing(&template.entries, &actual.entries, &ignore_patterns);

    #[cfg(feature = "tracing")]
    info!("Check complete: {} missing variable(s)", missing.len());

    Ok(CheckOutcome::Report(CheckReport {
      missing: missing.into_iter().map(EnvEntry::into_owned).collect(),
      template_path: template_file,
      env_path,
    }))
  }

  /// Appends remediation results to the env file.
  ///
  /// Accepted values become `KEY=value` lines, skipped keys become `# KEY=`
  /// lines. A newline separator is inserted first when the existing content
  /// doesn't already end in one. The file is created when absent. Returns
  /// the number of lines appended.
  pub fn append_resolutions<P: AsRef<Path>>(
    env_path: P,
    resolutions: &[(String, Resolution)],
  ) -> Result<usize, EnvCheckError> {
    if resolutions.is_empty() {
      return Ok(0);
    }

    let env_path = env_path.as_ref();
    let existing = match std::fs::read_to_string(env_path) {
      Ok(content) => content,
      Err(error) if error.kind() == std::io::ErrorKind::NotFound => String::new(),
      Err(error) => return Err(EnvCheckError::EnvIo(error)),
    };

    let lines: Vec<String> = resolutions
      .iter()
      .map(|(key, resolution)| match resolution {
        Resolution::Value(value) => format!("{}={}", key, value),
        Resolution::Skipped => format!("# {}=", key),
      })
      .collect();

    let separator = if !existing.is_empty() && !existing.ends_with('\n') {
      "\n"
    } else {
      ""
    };
    let content = format!("{}{}\n", separator, lines.join("\n"));

    let mut file = std::fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(env_path)
      .map_err(EnvCheckError::Append)?;
    file
      .write_all(content.as_bytes())
      .map_err(EnvCheckError::Append)?;

    #[cfg(feature = "tracing")]
    info!("Appended {} variable(s) to {:?}", lines.len(), env_path);

    Ok(lines.len())
  }
}

/// Configuration options for a drift check.
pub struct CheckOptions {
  /// Path to the env file. If None, defaults to `.env` in the current
  /// directory.
  pub env_file: Option<PathBuf>,
  /// Path to the template file enumerating the expected keys.
  pub template_file: PathBuf,
  /// Regex patterns; matching keys are never reported as missing.
  pub ignore_patterns: Vec<String>,
}

/// Result of running a drift check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
  /// The check ran and produced a report.
  Report(CheckReport),
  /// The template file doesn't exist; the check was skipped.
  TemplateMissing(PathBuf),
}

/// Variables missing from the env file, with the paths that were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
  /// Template entries absent from the env file, in template order.
  pub missing: Vec<EnvEntry<'static>>,
  pub template_path: PathBuf,
  pub env_path: PathBuf,
}

/// Per-key outcome of the remediation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// The user supplied a value; append `KEY=value`.
  Value(String),
  /// The user skipped the key; append a commented-out `# KEY=` placeholder.
  Skipped,
}

/// Errors that can occur while checking or updating env files.
#[derive(Debug, thiserror::Error)]
pub enum EnvCheckError {
  /// Error reading the template file
  #[error("Template file IO error: {0}")]
  TemplateIo(std::io::Error),
  /// Error reading the env file
  #[error("Env file IO error: {0}")]
  EnvIo(std::io::Error),
  /// Error appending to the env file
  #[error("Append error: {0}")]
  Append(std::io::Error),
}
