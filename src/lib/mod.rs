//! Configuration-drift detection for environment files.
//!
//! This library checks an actual env file against a template (e.g. `.env`
//! against `.env.example`), reports the variables the template declares but
//! the env file lacks, and helps append them back.
//!
//! # Features
//!
//! - **Tolerant parsing**: any text parses into an ordered entry list —
//!   quoting, inline comments, CRLF and malformed lines included
//! - **Zero-copy entries**: uses `Cow<str>` borrowed from the source text
//! - **Regex ignore patterns**: keys matching a pattern are never reported;
//!   invalid patterns are dropped without failing the check
//! - **Remediation flow**: per-key prompts and `KEY=value` append-back
//! - **Optional tracing**: detailed logging when the `tracing` feature is
//!   enabled
//!
//! The parsing and diffing core ([`parse`], [`diff`]) does no I/O; it takes
//! text and returns data. File access lives in [`check`] and [`config`].
//!
//! # Example
//!
//! ```rust
//! use env_guard::diff::find_missing;
//! use env_guard::parse::EnvFile;
//!
//! let template = EnvFile::parse("# Database host\nDB_HOST=localhost\nDB_PORT=5432");
//! let actual = EnvFile::parse("DB_PORT=5432");
//!
//! let missing = find_missing(&template.entries, &actual.entries, &[]);
//! assert_eq!(missing.len(), 1);
//! assert_eq!(missing[0].key, "DB_HOST");
//! assert_eq!(missing[0].comment.as_deref(), Some("Database host"));
//! ```

pub mod check;
pub mod config;
pub mod diff;
pub mod parse;
pub mod wizard;
