use std::{borrow::Cow, fmt};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

const COMMENT_PREFIX: char = '#';
const ASSIGNMENT_OPERATOR: char = '=';
const INLINE_COMMENT_MARKER: &str = " #";

/// An ordered collection of variables parsed from env-file text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvFile<'a> {
  pub entries: Vec<EnvEntry<'a>>,
}

impl<'a> fmt::Display for EnvFile<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for entry in &self.entries {
      writeln!(f, "{}", entry)?;
    }
    Ok(())
  }
}

impl<'a> From<&'a str> for EnvFile<'a> {
  fn from(s: &'a str) -> Self {
    Self::parse(s)
  }
}

/// Single-slot state machine for the comment line preceding a declaration.
///
/// A blank line clears the slot, a newer comment line overwrites it, and the
/// next declaration consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum CommentState<'a> {
  #[default]
  Empty,
  Pending(&'a str),
}

impl<'a> CommentState<'a> {
  fn set(&mut self, text: &'a str) {
    *self = CommentState::Pending(text);
  }

  fn clear(&mut self) {
    *self = CommentState::Empty;
  }

  fn take(&mut self) -> Option<&'a str> {
    match std::mem::take(self) {
      CommentState::Empty => None,
      CommentState::Pending(text) => Some(text),
    }
  }
}

impl<'a> EnvFile<'a> {
  /// Parses env-file text into ordered entries.
  ///
  /// The parser is total: malformed lines degrade to a best-effort
  /// interpretation instead of failing. Lines without `=` become a key with
  /// an empty value, lines with an empty key are dropped, and quoting or
  /// inline comments in values are resolved per [`parse_value`].
  pub fn parse(content: &'a str) -> Self {
    #[cfg(feature = "tracing")]
    debug!("Parsing env content with {} lines", content.lines().count());

    let mut entries = Vec::new();
    let mut pending = CommentState::default();

    for (index, raw) in content.lines().enumerate() {
      #[cfg(feature = "tracing")]
      trace!("Parsing line {}: {:?}", index + 1, raw);

      let trimmed = raw.trim();

      if trimmed.is_empty() {
        pending.clear();
        continue;
      }

      if let Some(rest) = trimmed.strip_prefix(COMMENT_PREFIX) {
        pending.set(rest.trim());
        continue;
      }

      let (key, value) = match trimmed.find(ASSIGNMENT_OPERATOR) {
        Some(eq_pos) => (
          trimmed[..eq_pos].trim(),
          parse_value(&trimmed[eq_pos + 1..]),
        ),
        None => (trimmed, ""),
      };

      if key.is_empty() {
        pending.clear();
        continue;
      }

      entries.push(EnvEntry {
        key: Cow::Borrowed(key),
        value: Cow::Borrowed(value),
        comment: pending.take().map(Cow::Borrowed),
        line: index + 1,
      });
    }

    #[cfg(feature = "tracing")]
    debug!("Parsed {} entries", entries.len());

    Self { entries }
  }

  /// Returns the first entry declaring `key`, if any.
  pub fn get(&self, key: &str) -> Option<&EnvEntry<'a>> {
    self.entries.iter().find(|entry| entry.key == key)
  }

  /// Lifts all borrowed text into owned strings.
  pub fn into_owned(self) -> EnvFile<'static> {
    EnvFile {
      entries: self.entries.into_iter().map(EnvEntry::into_owned).collect(),
    }
  }
}

/// One declared variable.
///
/// Duplicate keys are retained in source order; the parser does not enforce
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry<'a> {
  pub key: Cow<'a, str>,
  /// Declared value, with quotes and inline comments already resolved.
  /// Empty is a valid value.
  pub value: Cow<'a, str>,
  /// Description from the single comment line directly above the
  /// declaration, with no blank line in between.
  pub comment: Option<Cow<'a, str>>,
  /// 1-based line number of the key/value pair in the source text.
  pub line: usize,
}

impl<'a> fmt::Display for EnvEntry<'a> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(comment) = &self.comment {
      writeln!(f, "{} {}", COMMENT_PREFIX, comment)?;
    }
    write!(f, "{}{}{}", self.key, ASSIGNMENT_OPERATOR, self.value)
  }
}

impl<'a> EnvEntry<'a> {
  pub fn into_owned(self) -> EnvEntry<'static> {
    EnvEntry {
      key: Cow::Owned(self.key.into_owned()),
      value: Cow::Owned(self.value.into_owned()),
      comment: self.comment.map(|comment| Cow::Owned(comment.into_owned())),
      line: self.line,
    }
  }
}

/// Resolves the raw text after `=` into the declared value.
///
/// A leading quote delimits the value up to the next matching quote, with no
/// comment stripping in between; an unterminated quote keeps the rest
/// verbatim. Unquoted values are cut at the first ` #`, so a `#` glued to the
/// value is kept.
fn parse_value(raw: &str) -> &str {
  let trimmed = raw.trim();

  if trimmed.is_empty() {
    return "";
  }

  for quote in ['"', '\''] {
    if let Some(rest) = trimmed.strip_prefix(quote) {
      return match rest.find(quote) {
        Some(end) => &rest[..end],
        None => rest,
      };
    }
  }

  match trimmed.find(INLINE_COMMENT_MARKER) {
    Some(pos) => trimmed[..pos].trim_end(),
    None => trimmed,
  }
}
