//! Set difference between template and actual env entries.
//!
//! The template file declares the keys a project expects; the actual env file
//! holds what the developer has locally. [`find_missing`] returns the
//! template entries whose keys are absent locally, minus any key matched by
//! an ignore pattern.

use std::collections::HashSet;

use regex::Regex;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

use crate::parse::EnvEntry;

/// Returns the template entries whose keys are missing from `actual`.
///
/// The result is an ordered subsequence of `template` with all fields passed
/// through unchanged. Keys matching any pattern in `ignore_patterns` are
/// dropped from the result; patterns that fail to compile are skipped without
/// affecting the rest.
///
/// Matching is an unanchored search: the pattern `TEST_` excludes every key
/// *containing* that substring. Anchor with `^`/`$` for prefix or whole-key
/// semantics.
pub fn find_missing<'a>(
  template: &[EnvEntry<'a>],
  actual: &[EnvEntry<'_>],
  ignore_patterns: &[String],
) -> Vec<EnvEntry<'a>> {
  let actual_keys: HashSet<&str> = actual.iter().map(|entry| entry.key.as_ref()).collect();
  let ignore = compile_patterns(ignore_patterns);

  let missing: Vec<EnvEntry<'a>> = template
    .iter()
    .filter(|entry| !actual_keys.contains(entry.key.as_ref()))
    .filter(|entry| !ignore.iter().any(|regex| regex.is_match(&entry.key)))
    .cloned()
    .collect();

  #[cfg(feature = "tracing")]
  debug!(
    "Diff of {} template entries against {} actual keys: {} missing",
    template.len(),
    actual_keys.len(),
    missing.len()
  );

  missing
}

/// Compiles ignore patterns, dropping the ones that fail to compile.
///
/// Each pattern is compiled independently, so one bad pattern never disables
/// the others.
pub fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
  let mut compiled = Vec::with_capacity(patterns.len());

  for pattern in patterns {
    match Regex::new(pattern) {
      Ok(regex) => compiled.push(regex),
      Err(_error) => {
        #[cfg(feature = "tracing")]
        trace!("Skipping invalid ignore pattern {:?}: {}", pattern, _error);
      }
    }
  }

  compiled
}
