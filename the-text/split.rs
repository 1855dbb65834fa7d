//! Positional and weighted splitting. Chunks always end on code point
//! boundaries.

/// Splits after each of the given 1-based code point `positions`.
///
/// Whatever follows the last position forms the final chunk; an empty
/// remainder is not emitted.
///
/// ```
/// use the_text::split::split_place;
///
/// assert_eq!(split_place("abcdefg", &[1, 3, 4]), ["a", "bc", "d", "efg"]);
/// ```
pub fn split_place(text: &str, positions: &[usize]) -> Vec<String> {
  let mut chunks = Vec::with_capacity(positions.len() + 1);
  let mut start = 0;
  for (count, (offset, ch)) in text.char_indices().enumerate() {
    if positions.contains(&(count + 1)) {
      let end = offset + ch.len_utf8();
      chunks.push(text[start..end].to_string());
      start = end;
    }
  }
  if start < text.len() {
    chunks.push(text[start..].to_string());
  }
  chunks
}

/// Groups code points into chunks, closing a chunk as soon as its UTF-8
/// length reaches `size` bytes. The last chunk may be shorter.
pub fn split_int(text: &str, size: usize) -> Vec<String> {
  let mut chunks = Vec::new();
  let mut start = 0;
  for (offset, ch) in text.char_indices() {
    let end = offset + ch.len_utf8();
    if end - start >= size {
      chunks.push(text[start..end].to_string());
      start = end;
    }
  }
  if start < text.len() {
    chunks.push(text[start..].to_string());
  }
  chunks
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn place() {
    assert_eq!(split_place("abcdefg", &[1, 3, 4]), ["a", "bc", "d", "efg"]);
    assert_eq!(split_place("abc", &[3]), ["abc"]);
    assert_eq!(split_place("abc", &[]), ["abc"]);
    assert_eq!(split_place("abc", &[10]), ["abc"]);
    assert_eq!(split_place("你好世界", &[1, 2]), ["你", "好", "世界"]);
    assert!(split_place("", &[1]).is_empty());
  }

  #[test]
  fn int() {
    assert_eq!(split_int("abcdefg", 3), ["abc", "def", "g"]);
    assert_eq!(split_int("abcdef", 3), ["abc", "def"]);
    assert_eq!(split_int("abc", 0), ["a", "b", "c"]);
    // Three byte characters overshoot a four byte budget.
    assert_eq!(split_int("你好世界", 4), ["你好", "世界"]);
    assert_eq!(split_int("a你b", 2), ["a你", "b"]);
    assert!(split_int("", 4).is_empty());
  }
}
