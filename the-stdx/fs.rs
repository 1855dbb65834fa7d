//! Filesystem collaborator used to persist and hydrate text buffers.
//!
//! Writing never panics: [`write`] reports failure as `false` and logs the
//! cause, while [`try_write`] and [`read`] surface the error to callers that
//! want to handle it.

use std::{
  fs::{
    self,
    OpenOptions,
  },
  io::Write,
  path::Path,
};

use eyre::{
  Result,
  WrapErr,
};

/// Writes `bytes` to `path`, creating the file (and any missing parent
/// directories) if needed.
///
/// When `append` is true and the file already exists the bytes are appended,
/// otherwise the file is truncated first.
pub fn try_write(path: impl AsRef<Path>, bytes: &[u8], append: bool) -> Result<()> {
  let path = path.as_ref();
  let display = dunce::simplified(path).display();

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)
      .wrap_err_with(|| format!("failed to create parent directory of '{display}'"))?;
  }

  let mut options = OpenOptions::new();
  options.create(true);
  if append {
    options.append(true);
  } else {
    options.write(true).truncate(true);
  }

  let mut file = options
    .open(path)
    .wrap_err_with(|| format!("failed to open '{display}' for writing"))?;
  file
    .write_all(bytes)
    .wrap_err_with(|| format!("failed to write '{display}'"))?;
  Ok(())
}

/// Same as [`try_write`], but reports the outcome as a flag.
pub fn write(path: impl AsRef<Path>, bytes: &[u8], append: bool) -> bool {
  match try_write(path, bytes, append) {
    Ok(()) => true,
    Err(err) => {
      log::warn!("{err:#}");
      false
    },
  }
}

/// Reads the whole file at `path` into memory.
pub fn read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
  let path = path.as_ref();
  fs::read(path)
    .wrap_err_with(|| format!("failed to read '{}'", dunce::simplified(path).display()))
}
