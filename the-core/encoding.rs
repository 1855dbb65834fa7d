//! Conversion of detected foreign charsets to UTF-8.

use std::collections::HashMap;

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::charset::{
  self,
  Detection,
  DetectorConfig,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
  #[error("no confident charset could be detected")]
  Undetected,
  #[error("no decoder registered for charset '{0}'")]
  NoDecoder(String),
  #[error("input is not valid {0}")]
  Malformed(&'static str),
}

/// Outcome of a successful conversion.
#[derive(Debug, PartialEq, Eq)]
pub enum Conversion {
  /// The bytes were already UTF-8 and need no work.
  AlreadyUtf8,
  /// Decoded text with HTML entities unescaped.
  Converted(String),
}

static DECODERS: Lazy<HashMap<String, &'static Encoding>> = Lazy::new(|| {
  use encoding_rs::*;

  let encodings: &[&'static Encoding] = &[
    BIG5,
    EUC_JP,
    EUC_KR,
    GB18030,
    GBK,
    IBM866,
    ISO_2022_JP,
    ISO_8859_10,
    ISO_8859_13,
    ISO_8859_14,
    ISO_8859_15,
    ISO_8859_16,
    ISO_8859_2,
    ISO_8859_3,
    ISO_8859_4,
    ISO_8859_5,
    ISO_8859_6,
    ISO_8859_7,
    ISO_8859_8,
    ISO_8859_8_I,
    KOI8_R,
    KOI8_U,
    MACINTOSH,
    SHIFT_JIS,
    UTF_16BE,
    UTF_16LE,
    UTF_8,
    WINDOWS_1250,
    WINDOWS_1251,
    WINDOWS_1252,
    WINDOWS_1253,
    WINDOWS_1254,
    WINDOWS_1255,
    WINDOWS_1256,
    WINDOWS_1257,
    WINDOWS_1258,
    WINDOWS_874,
    X_MAC_CYRILLIC,
    X_USER_DEFINED,
  ];

  let mut decoders: HashMap<_, _> = encodings
    .iter()
    .map(|&encoding| (encoding.name().to_ascii_uppercase(), encoding))
    .collect();
  decoders.insert("GB2312".to_string(), GBK);
  decoders
});

/// Looks up the decoder registered for `name`, ignoring ASCII case.
pub fn decoder_for(name: &str) -> Option<&'static Encoding> {
  DECODERS.get(&name.to_ascii_uppercase()).copied()
}

/// Decodes `bytes` with the decoder registered for `charset` and unescapes
/// HTML entities in the result. Bytes the decoder cannot map are an error
/// rather than replacement characters.
pub fn decode_as(bytes: &[u8], charset: &str) -> Result<String, ConvertError> {
  let encoding = decoder_for(charset).ok_or_else(|| ConvertError::NoDecoder(charset.to_string()))?;
  let decoded = encoding
    .decode_without_bom_handling_and_without_replacement(bytes)
    .ok_or(ConvertError::Malformed(encoding.name()))?;

  Ok(html_escape::decode_html_entities(&decoded).into_owned())
}

/// Detects the charset of `bytes` and converts them to UTF-8.
pub fn to_utf8(bytes: &[u8], config: &DetectorConfig) -> Result<Conversion, ConvertError> {
  convert(bytes, &charset::detect(bytes, config))
}

/// Converts `bytes` to UTF-8 according to an earlier `detection`.
pub fn convert(bytes: &[u8], detection: &Detection) -> Result<Conversion, ConvertError> {
  if !detection.confident {
    return Err(ConvertError::Undetected);
  }
  if detection.is_utf8() {
    return Ok(Conversion::AlreadyUtf8);
  }

  let text = decode_as(bytes, &detection.charset)?;
  log::debug!(
    "converted {} bytes of {} to UTF-8",
    bytes.len(),
    detection.charset
  );
  Ok(Conversion::Converted(text))
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::charset::test::{
    SAMPLE,
    gbk_sample,
  };

  #[test]
  fn registry_lookup_ignores_case() {
    assert_eq!(decoder_for("gbk"), Some(encoding_rs::GBK));
    assert_eq!(decoder_for("GBK"), Some(encoding_rs::GBK));
    assert_eq!(decoder_for("gb2312"), Some(encoding_rs::GBK));
    assert_eq!(decoder_for("Shift_JIS"), Some(encoding_rs::SHIFT_JIS));
    assert_eq!(decoder_for("UTF-8"), Some(encoding_rs::UTF_8));
    assert_eq!(decoder_for("EBCDIC"), None);
  }

  #[test]
  fn converts_gbk() {
    let conversion = to_utf8(&gbk_sample(), &DetectorConfig::default()).unwrap();
    assert_eq!(conversion, Conversion::Converted(SAMPLE.to_string()));
  }

  #[test]
  fn utf8_is_left_alone() {
    let conversion = to_utf8(SAMPLE.as_bytes(), &DetectorConfig::default()).unwrap();
    assert_eq!(conversion, Conversion::AlreadyUtf8);
  }

  #[test]
  fn entities_are_unescaped_after_decoding() {
    let mut bytes = gbk_sample();
    bytes.extend_from_slice(b" &amp; &lt;b&gt;");
    let decoded = decode_as(&bytes, "GBK").unwrap();
    assert_eq!(decoded, format!("{SAMPLE} & <b>"));
  }

  #[test]
  fn unknown_decoder_is_an_error() {
    assert_eq!(
      decode_as(b"abc", "x-klingon"),
      Err(ConvertError::NoDecoder("x-klingon".to_string()))
    );
  }

  #[test]
  fn malformed_bytes_are_an_error() {
    assert_eq!(
      decode_as(&[0xC4], "GBK"),
      Err(ConvertError::Malformed("GBK"))
    );
  }

  #[test]
  fn conversion_failures() {
    let bytes = gbk_sample();
    assert_eq!(
      convert(&bytes, &Detection::unknown()),
      Err(ConvertError::Undetected)
    );
    assert_eq!(
      convert(&bytes, &Detection::confident("EBCDIC")),
      Err(ConvertError::NoDecoder("EBCDIC".to_string()))
    );
    assert_eq!(
      convert(&[b'a', 0xC4], &Detection::confident("GBK")),
      Err(ConvertError::Malformed("GBK"))
    );
    assert_eq!(
      convert(&bytes, &Detection::confident("gbk")),
      Ok(Conversion::Converted(SAMPLE.to_string()))
    );
  }
}
