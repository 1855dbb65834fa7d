//! Configuration for text values, usually read from a TOML file:
//!
//! ```toml
//! [case]
//! separators = [".", "_", "-", "/"]
//!
//! [charset]
//! tld = "cn"
//! weak-fallbacks = ["WINDOWS-1252"]
//!
//! [write]
//! append = false
//! ```
//!
//! Every section and key is optional and falls back to its default.

use std::path::Path;

use eyre::{
  Context,
  Result,
};
use serde::Deserialize;
use the_core::charset::DetectorConfig;

use crate::case_convention::DEFAULT_SEPARATORS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TextConfig {
  pub case: CaseConfig,
  pub charset: DetectorConfig,
  pub write: WriteConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CaseConfig {
  /// Characters that separate words besides whitespace.
  pub separators: Vec<char>,
}

impl Default for CaseConfig {
  fn default() -> Self {
    Self {
      separators: DEFAULT_SEPARATORS.to_vec(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct WriteConfig {
  /// Append to existing files instead of truncating them.
  pub append: bool,
}

impl TextConfig {
  pub fn from_toml_str(source: &str) -> Result<Self> {
    toml::from_str(source).context("failed to parse text config")
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let bytes = the_stdx::fs::read(path)?;
    let source = std::str::from_utf8(&bytes)
      .with_context(|| format!("{} contains invalid UTF-8", path.display()))?;
    Self::from_toml_str(source).with_context(|| format!("in {}", path.display()))
  }
}
