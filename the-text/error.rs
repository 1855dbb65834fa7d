use the_core::{
  base::BaseError,
  encoding::ConvertError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
  #[error("invalid pattern `{pattern}`: {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: Box<regex_automata::meta::BuildError>,
  },
  #[error(transparent)]
  Base(#[from] BaseError),
  #[error(transparent)]
  Convert(#[from] ConvertError),
}

pub type Result<T> = std::result::Result<T, TextError>;
