use std::{
  borrow::Cow,
  fmt,
  path::Path,
  sync::Arc,
};

use once_cell::sync::Lazy;
use the_core::{
  base,
  chars::{
    contains_han,
    narrow_char,
    widen_char,
  },
  charset::{
    self,
    Detection,
  },
  encoding::{
    self,
    Conversion,
  },
  escape,
  line_ending::{
    self,
    LineEnding,
  },
};

use crate::{
  Result,
  TextConfig,
  case_convention,
  comment,
  pattern,
  split,
};

static DEFAULT_CONFIG: Lazy<Arc<TextConfig>> = Lazy::new(Arc::default);

/// A mutable text buffer with a chainable editing API.
///
/// Editing methods mutate the buffer in place and return `&mut Self`;
/// projections such as [`get`](Self::get) and [`lines`](Self::lines) leave it
/// alone. A value built from bytes that are not UTF-8 keeps them as an
/// unconverted foreign byte stream until [`to_utf8`](Self::to_utf8) decodes
/// them. Any other edit on such a value decodes it lossily first.
#[derive(Debug, Clone)]
pub struct TextValue {
  text: String,
  /// Unconverted foreign bytes. When set, `text` is empty.
  raw: Option<Vec<u8>>,
  config: Arc<TextConfig>,
}

impl Default for TextValue {
  fn default() -> Self {
    Self::new()
  }
}

impl TextValue {
  pub fn new() -> Self {
    Self {
      text: String::new(),
      raw: None,
      config: Arc::clone(&DEFAULT_CONFIG),
    }
  }

  pub fn with_config(config: TextConfig) -> Self {
    Self {
      config: Arc::new(config),
      ..Self::new()
    }
  }

  /// Concatenates `fragments` into a new value.
  pub fn from_fragments<I, S>(fragments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut text = Self::new();
    text.add(fragments);
    text
  }

  /// Wraps raw bytes. Valid UTF-8 becomes text right away; anything else is
  /// kept as-is for charset detection.
  pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
    let mut text = Self::new();
    match String::from_utf8(bytes.into()) {
      Ok(utf8) => text.text = utf8,
      Err(err) => text.raw = Some(err.into_bytes()),
    }
    text
  }

  /// Reads the whole file at `path`.
  pub fn open(path: impl AsRef<Path>) -> eyre::Result<Self> {
    Ok(Self::from_bytes(the_stdx::fs::read(path)?))
  }

  pub fn config(&self) -> &TextConfig {
    &self.config
  }

  fn text_mut(&mut self) -> &mut String {
    if let Some(raw) = self.raw.take() {
      log::debug!("decoding {} unconverted bytes lossily", raw.len());
      self.text = String::from_utf8_lossy(&raw).into_owned();
    }
    &mut self.text
  }

  fn set(&mut self, text: String) -> &mut Self {
    self.raw = None;
    self.text = text;
    self
  }

  fn map(&mut self, f: impl FnOnce(&str) -> String) -> &mut Self {
    let text = f(&*self.get());
    self.set(text)
  }

  /// Applies a fallible edit. On error the buffer, raw bytes included, is
  /// left alone.
  fn try_map(&mut self, f: impl FnOnce(&str) -> Result<String>) -> Result<&mut Self> {
    let text = f(&*self.get())?;
    Ok(self.set(text))
  }

  // ---------------------------------------------------------------------
  // Input

  /// Appends each fragment in order.
  pub fn add<I, S>(&mut self, fragments: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let text = self.text_mut();
    for fragment in fragments {
      text.push_str(fragment.as_ref());
    }
    self
  }

  /// Appends `count` line feeds.
  pub fn ln(&mut self, count: usize) -> &mut Self {
    let text = self.text_mut();
    for _ in 0..count {
      text.push_str(LineEnding::LF.as_str());
    }
    self
  }

  // ---------------------------------------------------------------------
  // Pattern editing

  /// Whether `pattern` occurs at least once.
  pub fn find(&self, pattern: &str, literal: bool) -> Result<bool> {
    pattern::find(&self.get(), pattern, literal)
  }

  /// Replaces every occurrence of `pattern`. See [`pattern`] for the
  /// replacement syntax in regex mode.
  pub fn replace(&mut self, pattern: &str, replacement: &str, literal: bool) -> Result<&mut Self> {
    self.try_map(|text| pattern::replace(text, pattern, replacement, literal))
  }

  /// Removes the matches of each regex in turn.
  pub fn remove<I, S>(&mut self, patterns: I) -> Result<&mut Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self.try_map(|text| pattern::remove(text, patterns))
  }

  /// Replaces the buffer with the concatenation of all matches. Without a
  /// match the buffer is left as it is.
  pub fn keep(&mut self, pattern: &str) -> Result<&mut Self> {
    let kept = pattern::keep(&self.get(), pattern)?;
    if let Some(kept) = kept {
      self.set(kept);
    }
    Ok(self)
  }

  /// All matches of `pattern`, each rewritten with `substitution` unless it
  /// is empty.
  pub fn extract(&self, pattern: &str, substitution: &str) -> Result<Vec<String>> {
    pattern::extract(&self.get(), pattern, substitution)
  }

  /// Narrows the buffer to the trimmed text between `start` and `end`.
  pub fn between(&mut self, start: &str, end: &str) -> &mut Self {
    let between = pattern::between(&self.get(), start, end);
    if let Some(between) = between {
      self.set(between);
    }
    self
  }

  /// Strips `//` and `/* */` comments and blank lines.
  pub fn re_comment(&mut self) -> &mut Self {
    self.map(comment::strip_comments)
  }

  // ---------------------------------------------------------------------
  // Character level editing

  /// Strips leading and trailing characters contained in `chars`.
  pub fn trim(&mut self, chars: &str) -> &mut Self {
    self.map(|text| text.trim_matches(|ch: char| chars.contains(ch)).to_string())
  }

  pub fn to_lower(&mut self) -> &mut Self {
    self.map(str::to_lowercase)
  }

  pub fn to_upper(&mut self) -> &mut Self {
    self.map(str::to_uppercase)
  }

  pub fn uc_first(&mut self) -> &mut Self {
    self.map(case_convention::uc_first)
  }

  pub fn lc_first(&mut self) -> &mut Self {
    self.map(case_convention::lc_first)
  }

  /// Half-width to full-width.
  pub fn widen(&mut self) -> &mut Self {
    self.map(|text| text.chars().map(widen_char).collect())
  }

  /// Full-width to half-width.
  pub fn narrow(&mut self) -> &mut Self {
    self.map(|text| text.chars().map(narrow_char).collect())
  }

  /// Encodes every code point as a base-`base` ordinal.
  pub fn en_base(&mut self, base: u32) -> Result<&mut Self> {
    self.try_map(|text| Ok(base::encode(text, base)?))
  }

  /// Reverses [`en_base`](Self::en_base). A malformed token is an error and
  /// leaves the buffer untouched.
  pub fn de_base(&mut self, base: u32) -> Result<&mut Self> {
    self.try_map(|text| Ok(base::decode(text, base)?))
  }

  // ---------------------------------------------------------------------
  // Case styles

  pub fn camel_case(&mut self) -> &mut Self {
    let config = Arc::clone(&self.config);
    self.map(|text| case_convention::to_camel_case(text, &config.case.separators))
  }

  pub fn snake_case(&mut self) -> &mut Self {
    let config = Arc::clone(&self.config);
    self.map(|text| case_convention::to_snake_case(text, &config.case.separators))
  }

  pub fn kebab_case(&mut self) -> &mut Self {
    let config = Arc::clone(&self.config);
    self.map(|text| case_convention::to_kebab_case(text, &config.case.separators))
  }

  // ---------------------------------------------------------------------
  // Output

  /// The buffer as text. Unconverted foreign bytes are decoded lossily.
  pub fn get(&self) -> Cow<'_, str> {
    match &self.raw {
      Some(raw) => String::from_utf8_lossy(raw),
      None => Cow::Borrowed(&self.text),
    }
  }

  pub fn bytes(&self) -> &[u8] {
    match &self.raw {
      Some(raw) => raw,
      None => self.text.as_bytes(),
    }
  }

  /// The buffer split on LF, ignoring one trailing LF.
  pub fn lines(&self) -> Vec<String> {
    line_ending::split_lines(&self.get())
      .map(str::to_string)
      .collect()
  }

  /// The first line ending in the buffer.
  pub fn line_ending(&self) -> Option<LineEnding> {
    line_ending::auto_detect_line_ending(&self.get())
  }

  /// The buffer with CRLF line endings rewritten as LF.
  pub fn lf(&self) -> String {
    line_ending::normalize_to_lf(&self.get())
  }

  pub fn split(&self, sep: &str) -> Vec<String> {
    self.get().split(sep).map(str::to_string).collect()
  }

  /// See [`split::split_place`].
  pub fn split_place(&self, positions: &[usize]) -> Vec<String> {
    split::split_place(&self.get(), positions)
  }

  /// See [`split::split_int`].
  pub fn split_int(&self, size: usize) -> Vec<String> {
    split::split_int(&self.get(), size)
  }

  /// Lower-case hex MD5 digest of the buffer bytes.
  pub fn md5(&self) -> String {
    format!("{:x}", md5::compute(self.bytes()))
  }

  /// Decodes URL and `%uXXXX` escapes, returning the text unchanged if the
  /// escapes are malformed.
  pub fn unescape(&self) -> String {
    escape::unescape(&self.get())
  }

  /// Persists the buffer, appending or truncating as configured.
  pub fn write(&self, path: impl AsRef<Path>) -> bool {
    self.write_with(path, self.config.write.append)
  }

  pub fn write_with(&self, path: impl AsRef<Path>, append: bool) -> bool {
    the_stdx::fs::write(path, self.bytes(), append)
  }

  // ---------------------------------------------------------------------
  // Charset

  pub fn charset(&self) -> Detection {
    charset::detect(self.bytes(), &self.config.charset)
  }

  pub fn is_gbk(&self) -> bool {
    charset::is_gbk(self.bytes())
  }

  pub fn is_utf8(&self) -> bool {
    charset::is_utf8(self.bytes())
  }

  /// Whether the buffer contains Han characters.
  pub fn exist_han(&self) -> bool {
    contains_han(&self.get())
  }

  /// Detects the charset of the buffer and converts it to UTF-8.
  ///
  /// On failure the buffer is left exactly as it was.
  pub fn try_to_utf8(&mut self) -> Result<&mut Self> {
    let detection = self.charset();
    self.try_convert(&detection)
  }

  /// Same as [`try_to_utf8`](Self::try_to_utf8), reporting success as a
  /// flag next to the resulting text.
  pub fn to_utf8(&mut self) -> (Cow<'_, str>, bool) {
    let detection = self.charset();
    self.convert(&detection)
  }

  /// Converts the buffer to UTF-8 from a charset detected or chosen earlier.
  pub fn try_convert(&mut self, detection: &Detection) -> Result<&mut Self> {
    let conversion = encoding::convert(self.bytes(), detection)?;
    match conversion {
      Conversion::AlreadyUtf8 => {
        if self.raw.is_some() {
          // Claimed to be UTF-8 despite failing strict validation.
          self.text_mut();
        }
        Ok(self)
      },
      Conversion::Converted(text) => Ok(self.set(text)),
    }
  }

  /// [`try_convert`](Self::try_convert) with the outcome as a flag. On
  /// failure the text is the unchanged buffer.
  pub fn convert(&mut self, detection: &Detection) -> (Cow<'_, str>, bool) {
    let converted = match self.try_convert(detection) {
      Ok(_) => true,
      Err(err) => {
        log::debug!("charset conversion failed: {err}");
        false
      },
    };
    (self.get(), converted)
  }
}

impl From<&str> for TextValue {
  fn from(text: &str) -> Self {
    Self::from(text.to_string())
  }
}

impl From<String> for TextValue {
  fn from(text: String) -> Self {
    let mut value = Self::new();
    value.text = text;
    value
  }
}

impl AsRef<[u8]> for TextValue {
  fn as_ref(&self) -> &[u8] {
    self.bytes()
  }
}

impl fmt::Display for TextValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.get())
  }
}
