//! Regex and literal search and replace over a text buffer.
//!
//! Patterns are compiled per call with [`regex_automata::meta::Regex`] and
//! use leftmost-first semantics. Replacement strings interpolate capture
//! groups: `$1`, `${1}` and `${name}` refer to groups, so a literal dollar
//! sign must be written as `$$`. Note that `$1a` names a group called `1a`;
//! write `${1}a` instead.

use regex_automata::meta::Regex;

use crate::{
  Result,
  TextError,
};

/// Compiles `pattern`, reporting failures with the offending pattern.
pub fn compile(pattern: &str) -> Result<Regex> {
  Regex::new(pattern).map_err(|source| TextError::Pattern {
    pattern: pattern.to_string(),
    source: Box::new(source),
  })
}

/// Replaces every non-overlapping match of `regex` in `text`, interpolating
/// group references in `replacement`.
pub fn replace_all(regex: &Regex, text: &str, replacement: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut last = 0;
  for caps in regex.captures_iter(text) {
    let Some(mat) = caps.get_match() else {
      continue;
    };
    out.push_str(&text[last..mat.start()]);
    caps.interpolate_string_into(text, replacement, &mut out);
    last = mat.end();
  }
  out.push_str(&text[last..]);
  out
}

/// Whether `pattern` occurs in `text`, as a regex or as a literal substring.
pub fn find(text: &str, pattern: &str, literal: bool) -> Result<bool> {
  if literal {
    return Ok(text.contains(pattern));
  }
  Ok(compile(pattern)?.is_match(text))
}

/// Replaces every occurrence of `pattern`. In literal mode `replacement` is
/// inserted verbatim.
pub fn replace(text: &str, pattern: &str, replacement: &str, literal: bool) -> Result<String> {
  if literal {
    return Ok(text.replace(pattern, replacement));
  }
  Ok(replace_all(&compile(pattern)?, text, replacement))
}

/// Removes every match of each pattern in turn. Later patterns see the text
/// left behind by earlier ones.
pub fn remove<I, S>(text: &str, patterns: I) -> Result<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  patterns
    .into_iter()
    .try_fold(text.to_string(), |text, pattern| {
      Ok(replace_all(&compile(pattern.as_ref())?, &text, ""))
    })
}

/// Concatenation of all non-overlapping matches, or `None` when nothing
/// matches.
pub fn keep(text: &str, pattern: &str) -> Result<Option<String>> {
  let regex = compile(pattern)?;
  let mut kept = None;
  for mat in regex.find_iter(text) {
    kept
      .get_or_insert_with(String::new)
      .push_str(&text[mat.range()]);
  }
  Ok(kept)
}

/// All non-overlapping matches in order. A non-empty `substitution` is
/// applied to each match on its own, as if by [`replace`].
pub fn extract(text: &str, pattern: &str, substitution: &str) -> Result<Vec<String>> {
  let regex = compile(pattern)?;
  let matches = regex.find_iter(text).map(|mat| &text[mat.range()]);

  if substitution.is_empty() {
    return Ok(matches.map(str::to_string).collect());
  }
  Ok(
    matches
      .map(|mat| replace_all(&regex, mat, substitution))
      .collect(),
  )
}

/// Byte offset of the first case-insensitive occurrence of `needle`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
  if needle.is_empty() {
    return Some(0);
  }

  haystack.char_indices().map(|(i, _)| i).find(|&i| {
    let mut rest = haystack[i..].chars().flat_map(char::to_lowercase);
    needle
      .chars()
      .flat_map(char::to_lowercase)
      .all(|ch| rest.next() == Some(ch))
  })
}

/// Text between `start` and `end`, trimmed of surrounding whitespace.
///
/// Both markers are matched case-insensitively. The slice begins at the byte
/// length of `start` when `start` occurs anywhere in the text (at 0
/// otherwise) and ends at the first occurrence of `end` (at the end of the
/// text otherwise). Returns `None` when both markers are empty or the text
/// is, leaving it unchanged; an empty string when the start lands past the
/// end.
pub fn between(text: &str, start: &str, end: &str) -> Option<String> {
  if (start.is_empty() && end.is_empty()) || text.is_empty() {
    return None;
  }

  let mut from = match find_ignore_case(text, start) {
    Some(_) if !start.is_empty() => start.len().min(text.len()),
    _ => 0,
  };
  while !text.is_char_boundary(from) {
    from += 1;
  }

  let to = match find_ignore_case(text, end) {
    Some(pos) if !end.is_empty() => pos,
    _ => text.len(),
  };

  if from > to {
    return Some(String::new());
  }
  Some(text[from..to].trim().to_string())
}
