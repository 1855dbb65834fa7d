//! Integer-base codec for code points.
//!
//! Every code point is written as its ordinal in the requested base (2 to 36,
//! lower-case digits) and the ordinals are joined with a single space.
//! Decoding reverses this and refuses anything it cannot map back to a
//! Unicode scalar value.

use std::ops::RangeInclusive;

use thiserror::Error;

pub const BASE_RANGE: RangeInclusive<u32> = 2..=36;

const SEPARATOR: char = ' ';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BaseError {
  #[error("base {0} is outside the supported range 2..=36")]
  InvalidBase(u32),
  #[error("'{token}' is not a valid base-{base} number")]
  MalformedToken { token: String, base: u32 },
  #[error("{value:#x} is not a Unicode scalar value")]
  InvalidScalar { value: u32 },
}

type Result<T> = std::result::Result<T, BaseError>;

fn check_base(base: u32) -> Result<()> {
  if BASE_RANGE.contains(&base) {
    Ok(())
  } else {
    Err(BaseError::InvalidBase(base))
  }
}

fn push_radix(mut value: u32, base: u32, buf: &mut String) {
  // u32::MAX in base 2 is 32 digits long.
  let mut digits = [0u8; 32];
  let mut len = 0;
  loop {
    let digit = char::from_digit(value % base, base).unwrap_or('0');
    digits[len] = digit as u8;
    len += 1;
    value /= base;
    if value == 0 {
      break;
    }
  }
  buf.extend(digits[..len].iter().rev().map(|&b| b as char));
}

/// Encodes every code point of `text` as a base-`base` ordinal.
pub fn encode(text: &str, base: u32) -> Result<String> {
  check_base(base)?;

  let mut out = String::with_capacity(text.len() * 4);
  for (i, ch) in text.chars().enumerate() {
    if i > 0 {
      out.push(SEPARATOR);
    }
    push_radix(ch as u32, base, &mut out);
  }
  Ok(out)
}

/// Decodes text produced by [`encode`]. An empty input decodes to an empty
/// string.
pub fn decode(encoded: &str, base: u32) -> Result<String> {
  check_base(base)?;

  if encoded.is_empty() {
    return Ok(String::new());
  }

  encoded
    .split(SEPARATOR)
    .map(|token| {
      let value = u32::from_str_radix(token, base).map_err(|_| {
        BaseError::MalformedToken {
          token: token.to_string(),
          base,
        }
      })?;
      char::from_u32(value).ok_or(BaseError::InvalidScalar { value })
    })
    .collect()
}

#[cfg(test)]
mod test {
  use quickcheck::{
    TestResult,
    quickcheck,
  };

  use super::*;

  #[test]
  fn encode_known_values() {
    assert_eq!(encode("AB", 16).unwrap(), "41 42");
    assert_eq!(encode("A", 2).unwrap(), "1000001");
    assert_eq!(encode("z", 36).unwrap(), "3e");
    assert_eq!(encode("你好", 16).unwrap(), "4f60 597d");
    assert_eq!(encode("", 10).unwrap(), "");
    assert_eq!(encode("\0", 10).unwrap(), "0");
  }

  #[test]
  fn decode_known_values() {
    assert_eq!(decode("41 42", 16).unwrap(), "AB");
    assert_eq!(decode("4F60 597D", 16).unwrap(), "你好");
    assert_eq!(decode("", 8).unwrap(), "");
  }

  #[test]
  fn rejects_out_of_range_base() {
    assert_eq!(encode("a", 1), Err(BaseError::InvalidBase(1)));
    assert_eq!(encode("a", 37), Err(BaseError::InvalidBase(37)));
    assert_eq!(decode("1", 0), Err(BaseError::InvalidBase(0)));
  }

  #[test]
  fn malformed_tokens_are_fatal() {
    assert_eq!(
      decode("12 z9", 10),
      Err(BaseError::MalformedToken {
        token: "z9".into(),
        base: 10,
      })
    );
    // Doubled separator leaves an empty token behind.
    assert!(matches!(
      decode("41  42", 16),
      Err(BaseError::MalformedToken { .. })
    ));
    assert!(matches!(
      decode("2", 2),
      Err(BaseError::MalformedToken { .. })
    ));
  }

  #[test]
  fn non_scalar_values_are_fatal() {
    assert_eq!(
      decode("d800", 16),
      Err(BaseError::InvalidScalar { value: 0xd800 })
    );
    assert_eq!(
      decode("110000", 16),
      Err(BaseError::InvalidScalar { value: 0x110000 })
    );
  }

  quickcheck! {
    fn round_trip(text: String, base: u32) -> TestResult {
      let base = 2 + base % 35;
      match encode(&text, base) {
        Ok(encoded) => TestResult::from_bool(decode(&encoded, base).as_deref() == Ok(text.as_str())),
        Err(_) => TestResult::failed(),
      }
    }
  }
}
