use once_cell::sync::Lazy;
use regex_automata::meta::Regex;

/// Offset between a printable ASCII character and its full-width form.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Lower-to-upper ASCII transition, the only word boundary recognized inside
/// a run of letters. Acronym runs such as `HTTPServer` are not split.
#[inline]
pub fn is_case_boundary(prev: char, ch: char) -> bool {
  prev.is_ascii_lowercase() && ch.is_ascii_uppercase()
}

/// Maps half-width ASCII to its full-width counterpart.
#[inline]
pub fn widen_char(ch: char) -> char {
  match ch {
    ' ' => IDEOGRAPHIC_SPACE,
    '!'..='~' => char::from_u32(ch as u32 + FULL_WIDTH_OFFSET).unwrap_or(ch),
    _ => ch,
  }
}

/// Maps full-width ASCII variants back to plain ASCII.
#[inline]
pub fn narrow_char(ch: char) -> char {
  match ch {
    IDEOGRAPHIC_SPACE => ' ',
    '\u{FF01}'..='\u{FF5E}' => char::from_u32(ch as u32 - FULL_WIDTH_OFFSET).unwrap_or(ch),
    _ => ch,
  }
}

fn han_regex() -> &'static Regex {
  static REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Han}").expect("han script regex should compile"));

  &REGEX
}

/// Whether `text` contains at least one character of the Han script.
pub fn contains_han(text: &str) -> bool {
  han_regex().is_match(text)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn width_folding() {
    assert_eq!(widen_char('A'), 'Ａ');
    assert_eq!(widen_char('~'), '～');
    assert_eq!(widen_char(' '), '\u{3000}');
    assert_eq!(widen_char('中'), '中');

    assert_eq!(narrow_char('Ａ'), 'A');
    assert_eq!(narrow_char('１'), '1');
    assert_eq!(narrow_char('\u{3000}'), ' ');
    assert_eq!(narrow_char('中'), '中');
  }

  #[test]
  fn width_folding_is_reversible_for_ascii() {
    for ch in ' '..='~' {
      assert_eq!(narrow_char(widen_char(ch)), ch);
    }
  }

  #[test]
  fn case_boundaries() {
    assert!(is_case_boundary('o', 'W'));
    assert!(!is_case_boundary('O', 'W'));
    assert!(!is_case_boundary('o', 'w'));
    assert!(!is_case_boundary('1', 'W'));
  }

  #[test]
  fn han_detection() {
    assert!(contains_han("hello 世界"));
    assert!(contains_han("漢"));
    assert!(!contains_han("hello world"));
    assert!(!contains_han("こんにちは"));
    assert!(!contains_han(""));
  }
}
