//! A chainable, mutable text value.
//!
//! [`TextValue`] owns a single buffer and every editing call mutates it in
//! place and hands back `&mut Self`, so edits compose fluently:
//!
//! ```
//! use the_text::TextValue;
//!
//! let mut text = TextValue::from("abc123def456");
//! text.keep("[0-9]+")?.replace("^1", "one-", false)?;
//! assert_eq!(text.get(), "one-23456");
//! # Ok::<(), the_text::TextError>(())
//! ```

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod case_convention;
pub mod comment;
pub mod config;
mod error;
pub mod pattern;
pub mod split;
mod text;

pub use config::TextConfig;
pub use error::{
  Result,
  TextError,
};
pub use text::TextValue;

pub type Tendril = SmartString<LazyCompact>;
