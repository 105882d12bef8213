//! Interactive remediation prompts for missing variables.
//!
//! Each missing variable is prompted one by one. The template's comment and
//! value are shown as hints; an empty answer (or end of input) skips the key.
//! The wizard only collects answers — appending them to the env file is done
//! by [`crate::check::EnvCheck::append_resolutions`].

use std::io::{self, BufRead, Write};

use crate::check::Resolution;
use crate::parse::EnvEntry;

/// Prompts for each missing variable and returns a resolution per key.
///
/// Generic over the input/output streams so it can be driven from tests.
/// Once the input stream is exhausted, every remaining key is skipped.
pub fn run<R: BufRead, W: Write>(
  input: &mut R,
  output: &mut W,
  missing: &[EnvEntry<'_>],
) -> io::Result<Vec<(String, Resolution)>> {
  let mut resolutions = Vec::with_capacity(missing.len());
  let mut exhausted = false;

  for (index, entry) in missing.iter().enumerate() {
    if exhausted {
      resolutions.push((entry.key.to_string(), Resolution::Skipped));
      continue;
    }

    write!(output, "({}/{}) {}", index + 1, missing.len(), entry.key)?;
    if let Some(comment) = &entry.comment {
      write!(output, " - {}", comment)?;
    }
    if !entry.value.is_empty() {
      write!(output, " [template: {}]", entry.value)?;
    }
    write!(output, "\nValue (empty to skip): ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
      exhausted = true;
      resolutions.push((entry.key.to_string(), Resolution::Skipped));
      continue;
    }

    let answer = line.trim_end_matches(['\r', '\n']);
    let resolution = if answer.is_empty() {
      Resolution::Skipped
    } else {
      Resolution::Value(answer.to_string())
    };
    resolutions.push((entry.key.to_string(), resolution));
  }

  Ok(resolutions)
}
