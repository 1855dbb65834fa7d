//! Line endings of in-memory text.

/// The line endings recognized when splitting and normalizing text.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum LineEnding {
  /// `\r\n`
  Crlf,
  /// `\n`
  LF,
  /// `\r`
  CR,
}

impl LineEnding {
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Crlf => "\r\n",
      Self::LF => "\n",
      Self::CR => "\r",
    }
  }

  #[inline]
  pub const fn from_char(ch: char) -> Option<LineEnding> {
    match ch {
      '\n' => Some(LineEnding::LF),
      '\r' => Some(LineEnding::CR),
      _ => None,
    }
  }
}

/// Returns the first line ending found in `text`, if any.
pub fn auto_detect_line_ending(text: &str) -> Option<LineEnding> {
  let pos = text.find(['\n', '\r'])?;
  if text[pos..].starts_with(LineEnding::Crlf.as_str()) {
    Some(LineEnding::Crlf)
  } else {
    text[pos..].chars().next().and_then(LineEnding::from_char)
  }
}

/// Rewrites every CRLF pair as a single LF. Lone CRs are left alone.
pub fn normalize_to_lf(text: &str) -> String {
  text.replace(LineEnding::Crlf.as_str(), LineEnding::LF.as_str())
}

/// Splits `text` on LF after dropping one trailing LF, so a text ending in a
/// single newline has no trailing empty element. An empty text yields one
/// empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
  let text = text.strip_suffix(LineEnding::LF.as_str()).unwrap_or(text);
  text.split(LineEnding::LF.as_str())
}

#[cfg(test)]
mod line_ending_tests {
  use quickcheck::{
    TestResult,
    quickcheck,
  };

  use super::*;

  #[test]
  fn line_ending_autodetect() {
    assert_eq!(auto_detect_line_ending("a\nb\r\n"), Some(LineEnding::LF));
    assert_eq!(auto_detect_line_ending("a\r\nb\n"), Some(LineEnding::Crlf));
    assert_eq!(auto_detect_line_ending("a\rb"), Some(LineEnding::CR));
    assert_eq!(auto_detect_line_ending("no endings"), None);
    assert_eq!(auto_detect_line_ending(""), None);
  }

  #[test]
  fn normalize_crlf() {
    assert_eq!(normalize_to_lf("a\r\nb\r\n"), "a\nb\n");
    assert_eq!(normalize_to_lf("a\rb\n"), "a\rb\n");
  }

  #[test]
  fn lines_drop_single_trailing_newline() {
    let lines: Vec<_> = split_lines("a\nb\n").collect();
    assert_eq!(lines, ["a", "b"]);

    let lines: Vec<_> = split_lines("a\nb\n\n").collect();
    assert_eq!(lines, ["a", "b", ""]);

    let lines: Vec<_> = split_lines("").collect();
    assert_eq!(lines, [""]);
  }

  quickcheck! {
    fn trailing_newline_does_not_add_a_line(text: String) -> TestResult {
      // A second trailing newline does add an empty line.
      if text.ends_with('\n') {
        return TestResult::discard();
      }
      let with_newline = format!("{text}\n");
      TestResult::from_bool(split_lines(&text).count() == split_lines(&with_newline).count())
    }
  }
}
