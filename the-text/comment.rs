//! Best-effort removal of C-style comments and blank lines.
//!
//! This is a textual pass, not a parser: comment markers inside string
//! literals are stripped as well.

use once_cell::sync::Lazy;
use regex_automata::meta::Regex;

use crate::pattern::replace_all;

fn comment_regexes() -> &'static [Regex; 3] {
  static REGEXES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
      // Line comments.
      Regex::new(r"//.*").expect("line comment regex should compile"),
      // Block comments, shortest match, spanning lines.
      Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex should compile"),
      // Blank lines, and trailing whitespace after the last line break.
      Regex::new(r"(?m)^\s*$[\r\n]*|[\r\n]+\s+\z").expect("blank line regex should compile"),
    ]
  });

  &REGEXES
}

/// Removes `//` line comments, `/* */` block comments and blank lines, in
/// that order.
pub fn strip_comments(text: &str) -> String {
  comment_regexes()
    .iter()
    .fold(text.to_string(), |text, regex| replace_all(regex, &text, ""))
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn strips_line_and_block_comments() {
    let source = "let a = 1; // one\n/* block\ncomment */\nlet b = 2;\n";
    assert_eq!(strip_comments(source), "let a = 1; \nlet b = 2;\n");
  }

  #[test]
  fn block_comments_are_not_greedy() {
    let source = "a /* x */ b /* y */ c";
    assert_eq!(strip_comments(source), "a  b  c");
  }

  #[test]
  fn drops_blank_lines() {
    assert_eq!(strip_comments("a\n\n   \nb"), "a\nb");
    // Trailing whitespace after the last line break goes too.
    assert_eq!(strip_comments("a\n  \n"), "a");
  }

  #[test]
  fn strips_inside_string_literals_too() {
    assert_eq!(strip_comments(r#"let url = "http://x";"#), r#"let url = "http:"#);
  }
}
