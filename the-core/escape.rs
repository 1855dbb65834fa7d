//! Decoding of `%uXXXX` escapes mixed with ordinary URL escapes, as produced
//! by JavaScript's `escape()`.
//!
//! The text is cut at every `%u` token. The stretches between tokens are
//! query-unescaped on their own and each run of adjacent tokens is decoded as
//! UTF-16, so a surrogate pair becomes one character and a lone surrogate is
//! restored to its `%uXXXX` spelling. Nothing produced by the URL decoder is
//! ever read back as a token.

use std::fmt::Write;

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex_automata::meta::Regex;

fn escape_regex() -> &'static Regex {
  static REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%u([0-9A-Fa-f]{4})").expect("unicode escape regex should compile")
  });

  &REGEX
}

#[derive(Debug)]
struct MalformedEscape;

/// Query-unescapes `text`: `+` becomes a space and every `%` must start a two
/// digit hex escape. The decoded bytes must form valid UTF-8.
fn query_unescape(text: &str) -> Result<String, MalformedEscape> {
  let bytes = text.as_bytes();
  let mut i = 0;
  while let Some(offset) = bytes[i..].iter().position(|&b| b == b'%') {
    let pos = i + offset;
    match bytes.get(pos + 1..pos + 3) {
      Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i = pos + 3,
      _ => return Err(MalformedEscape),
    }
  }

  let plus_decoded = text.replace('+', " ");
  percent_decode_str(&plus_decoded)
    .decode_utf8()
    .map(|decoded| decoded.into_owned())
    .map_err(|_| MalformedEscape)
}

/// Decodes a run of adjacent `%u` code units into `out`.
fn flush_units(units: &mut Vec<u16>, out: &mut String) {
  for decoded in char::decode_utf16(units.drain(..)) {
    match decoded {
      Ok(ch) => out.push(ch),
      Err(err) => {
        let _ = write!(out, "%u{:04X}", err.unpaired_surrogate());
      },
    }
  }
}

fn decode(text: &str) -> Result<String, MalformedEscape> {
  let mut out = String::with_capacity(text.len());
  let mut units = Vec::new();
  let mut last = 0;

  for caps in escape_regex().captures_iter(text) {
    let (Some(mat), Some(hex)) = (caps.get_match(), caps.get_group(1)) else {
      continue;
    };
    if mat.start() > last {
      flush_units(&mut units, &mut out);
      out.push_str(&query_unescape(&text[last..mat.start()])?);
    }
    let unit = u16::from_str_radix(&text[hex.range()], 16).map_err(|_| MalformedEscape)?;
    units.push(unit);
    last = mat.end();
  }

  flush_units(&mut units, &mut out);
  out.push_str(&query_unescape(&text[last..])?);
  Ok(out)
}

/// Decodes URL escapes and `%uXXXX` escapes in `text`.
///
/// Malformed URL escapes make this a no-op: the input is returned unchanged
/// and no error is reported.
pub fn unescape(text: &str) -> String {
  match decode(text) {
    Ok(decoded) => decoded,
    Err(MalformedEscape) => {
      log::debug!("leaving text with malformed URL escapes untouched");
      text.to_string()
    },
  }
}
