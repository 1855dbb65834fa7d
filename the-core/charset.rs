//! Charset classification of raw byte sequences.
//!
//! Detection runs in a fixed order and the first confident verdict wins:
//!
//! 1. a statistical guess from [`chardetng`], rejected when it lands on a
//!    weak Western single-byte fallback such as `windows-1252`;
//! 2. a structural scan that accepts the bytes if every multi-byte sequence is
//!    a valid GBK lead/trail pair;
//! 3. GBK again if a lossy Unicode scan of the bytes finds any Han character.
//!
//! Anything else is reported as not confident. The result is a best-effort
//! guess: bytes that are valid GBK are often also plausible under other
//! legacy charsets.

use chardetng::EncodingDetector;
use encoding_rs::{
  Encoding,
  UTF_8,
};
use serde::Deserialize;

use crate::chars::contains_han;

pub const UTF8: &str = "UTF-8";
pub const GBK: &str = "GBK";

const DEFAULT_TLD: &str = "cn";

/// Knobs for the statistical guesser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DetectorConfig {
  /// Top-level domain the bytes came from. Defaults to `"cn"`, which makes
  /// the guesser prefer GBK over other CJK legacy charsets on short input.
  /// An empty string gives no hint.
  pub tld: Option<String>,
  /// Charset names the guesser falls back to when it has nothing better.
  pub weak_fallbacks: Vec<String>,
}

impl Default for DetectorConfig {
  fn default() -> Self {
    Self {
      tld: Some(DEFAULT_TLD.to_string()),
      weak_fallbacks: vec!["WINDOWS-1252".to_string()],
    }
  }
}

impl DetectorConfig {
  fn is_weak(&self, name: &str) -> bool {
    self
      .weak_fallbacks
      .iter()
      .any(|weak| weak.eq_ignore_ascii_case(name))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
  /// Upper-cased charset name, empty when nothing could be determined.
  pub charset: String,
  pub confident: bool,
}

impl Detection {
  pub fn confident(charset: impl Into<String>) -> Self {
    Self {
      charset: charset.into(),
      confident: true,
    }
  }

  pub fn unknown() -> Self {
    Self {
      charset: String::new(),
      confident: false,
    }
  }

  pub fn is_utf8(&self) -> bool {
    self.confident && self.charset == UTF8
  }
}

/// Runs the full detection pipeline over `bytes`.
pub fn detect(bytes: &[u8], config: &DetectorConfig) -> Detection {
  if let Some(charset) = statistical_guess(bytes, config) {
    log::debug!("charset guessed statistically: {charset}");
    return Detection::confident(charset);
  }

  if is_gbk(bytes) {
    log::debug!("charset classified as GBK by structure");
    return Detection::confident(GBK);
  }

  if contains_han(&String::from_utf8_lossy(bytes)) {
    log::debug!("charset classified as GBK by Han script presence");
    return Detection::confident(GBK);
  }

  log::debug!("no confident charset for {} bytes", bytes.len());
  Detection::unknown()
}

fn statistical_guess(bytes: &[u8], config: &DetectorConfig) -> Option<String> {
  // Pure ASCII carries no statistical signal; it is a subset of UTF-8.
  if Encoding::ascii_valid_up_to(bytes) == bytes.len() {
    return Some(UTF8.to_string());
  }

  let mut detector = EncodingDetector::new();
  detector.feed(bytes, true);
  let tld = config
    .tld
    .as_deref()
    .filter(|tld| !tld.is_empty())
    .map(str::as_bytes);
  let (encoding, high_confidence) = detector.guess_assess(tld, true);

  let name = encoding.name().to_ascii_uppercase();
  if !high_confidence && config.is_weak(&name) {
    log::debug!("rejecting low confidence fallback guess {name}");
    return None;
  }

  if encoding == UTF_8 {
    return Some(UTF8.to_string());
  }
  Some(name)
}

/// Structural GBK check: ASCII bytes stand alone, every other byte must be a
/// lead byte in `0x81..=0xFE` followed by a trail byte in `0x40..=0xFE` other
/// than `0xF7`.
pub fn is_gbk(bytes: &[u8]) -> bool {
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i] <= 0x7F {
      i += 1;
      continue;
    }

    match (bytes[i], bytes.get(i + 1)) {
      (0x81..=0xFE, Some(&trail)) if (0x40..=0xFE).contains(&trail) && trail != 0xF7 => i += 2,
      _ => return false,
    }
  }
  true
}

/// Number of bytes a UTF-8 sequence starting with `lead` declares, or `None`
/// for a continuation byte or an invalid lead.
fn declared_len(lead: u8) -> Option<usize> {
  match lead.leading_ones() {
    0 => Some(1),
    n @ 2..=4 => Some(n as usize),
    _ => None,
  }
}

/// Structural UTF-8 check: each lead byte must be followed by exactly the
/// number of `10xxxxxx` continuation bytes it declares.
pub fn is_utf8(bytes: &[u8]) -> bool {
  let mut i = 0;
  while i < bytes.len() {
    let Some(len) = declared_len(bytes[i]) else {
      return false;
    };
    let Some(continuation) = bytes.get(i + 1..i + len) else {
      return false;
    };
    if continuation.iter().any(|&b| b & 0xC0 != 0x80) {
      return false;
    }
    i += len;
  }
  true
}

#[cfg(test)]
pub(crate) mod test {
  use super::*;

  pub(crate) const SAMPLE: &str = "我们的世界是一个充满希望的地方。今天天气很好，\
                                   我们一起去公园散步，看到了很多美丽的花朵和绿色的树木。\
                                   中文字符的编码转换是一个常见的问题。";

  pub(crate) fn gbk_sample() -> Vec<u8> {
    let (bytes, _, had_errors) = encoding_rs::GBK.encode(SAMPLE);
    assert!(!had_errors);
    bytes.into_owned()
  }

  #[test]
  fn gbk_structure() {
    assert!(is_gbk(&gbk_sample()));
    assert!(is_gbk(b"plain ascii"));
    assert!(is_gbk(b""));
    // Lead byte without a trail byte.
    assert!(!is_gbk(&[b'a', 0xC4]));
    // 0xF7 is not a valid trail byte.
    assert!(!is_gbk(&[0xC4, 0xF7]));
    // Trail byte below range.
    assert!(!is_gbk(&[0xC4, 0x20]));
    // 0x80 and 0xFF never lead.
    assert!(!is_gbk(&[0x80, 0x40]));
    assert!(!is_gbk(&[0xFF, 0x40]));
  }

  #[test]
  fn utf8_structure() {
    assert!(is_utf8(SAMPLE.as_bytes()));
    assert!(is_utf8("héllo 😀".as_bytes()));
    assert!(is_utf8(b""));
    assert!(!is_utf8(&gbk_sample()));
    // Stray continuation byte.
    assert!(!is_utf8(&[0x80]));
    // Truncated three byte sequence.
    assert!(!is_utf8(&[0xE4, 0xBD]));
    // Five leading ones is never valid.
    assert!(!is_utf8(&[0xF8, 0x80, 0x80, 0x80, 0x80]));
  }

  #[test]
  fn detects_gbk() {
    let detection = detect(&gbk_sample(), &DetectorConfig::default());
    assert_eq!(detection, Detection::confident(GBK));
  }

  #[test]
  fn detects_short_gbk() {
    for text in ["你好", "你好吗"] {
      let (bytes, ..) = encoding_rs::GBK.encode(text);
      let detection = detect(&bytes, &DetectorConfig::default());
      assert_eq!(detection, Detection::confident(GBK), "{text}");
    }
  }

  #[test]
  fn detects_utf8() {
    let detection = detect(SAMPLE.as_bytes(), &DetectorConfig::default());
    assert!(detection.is_utf8());
  }

  #[test]
  fn ascii_is_utf8() {
    let detection = detect(b"just some ascii text", &DetectorConfig::default());
    assert!(detection.is_utf8());
    assert!(detect(b"", &DetectorConfig::default()).is_utf8());
  }

  #[test]
  fn weak_fallbacks_are_case_insensitive() {
    let config = DetectorConfig::default();
    assert!(config.is_weak("windows-1252"));
    assert!(config.is_weak("WINDOWS-1252"));
    assert!(!config.is_weak("GBK"));
  }

  #[test]
  fn unknown_detection_is_not_utf8() {
    assert!(!Detection::unknown().is_utf8());
    assert!(!Detection::unknown().confident);
  }
}
