use smallvec::SmallVec;
use the_core::chars::is_case_boundary;

use crate::Tendril;

/// Separators recognized when no configuration says otherwise.
pub const DEFAULT_SEPARATORS: [char; 3] = ['.', '_', '-'];

/// Ordered tokens of a text, as split by [`case_words`].
pub type WordSequence = SmallVec<[Tendril; 4]>;

/// Splits `text` into words.
///
/// Words are separated by whitespace and by any of `separators`. When
/// `split_camel` is set, a lowercase ASCII letter directly followed by an
/// uppercase one also starts a new word. Acronym runs are not special:
/// `HTTPServer` stays a single word.
pub fn case_words(text: &str, split_camel: bool, separators: &[char]) -> WordSequence {
  let mut spaced = String::with_capacity(text.len() + 8);
  let mut prev = None;
  for ch in text.chars() {
    if split_camel && prev.is_some_and(|prev| is_case_boundary(prev, ch)) {
      spaced.push(' ');
    }
    spaced.push(ch);
    prev = Some(ch);
  }

  spaced
    .split(|ch: char| ch.is_whitespace() || separators.contains(&ch))
    .filter(|word| !word.is_empty())
    .map(Tendril::from)
    .collect()
}

pub fn uc_first(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

pub fn lc_first(text: &str) -> String {
  let mut chars = text.chars();
  match chars.next() {
    Some(first) => first.to_lowercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Upper-cases the first letter of every word and joins them: `HelloWorld`.
/// Existing camel humps are kept as they are.
pub fn to_camel_case(text: &str, separators: &[char]) -> String {
  case_words(text, false, separators)
    .iter()
    .map(|word| uc_first(word))
    .collect()
}

pub fn to_snake_case(text: &str, separators: &[char]) -> String {
  to_separated_case(text, separators, "_")
}

pub fn to_kebab_case(text: &str, separators: &[char]) -> String {
  to_separated_case(text, separators, "-")
}

/// Shared implementation for snake_case and kebab-case. The words keep their
/// case; only the separator differs.
fn to_separated_case(text: &str, separators: &[char], sep: &str) -> String {
  case_words(text, true, separators).join(sep)
}
