//! Text algorithms shared by the text value: character classes, line
//! endings, integer-base codec, charset detection and conversion, and
//! `%uXXXX` unescaping.

pub mod base;
pub mod charset;
pub mod chars;
pub mod encoding;
pub mod escape;
pub mod line_ending;
