//! Copy a converted file to the location picked in the save dialog.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while saving the converted file.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("no converted file is available")]
    NoConvertedFile,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Stream `source` into `destination`, replacing it if it exists.
///
/// Returns the number of bytes copied. Blocks until the copy is done.
/// Saving a file onto itself leaves it untouched.
pub fn save_converted(source: &Path, destination: &Path) -> Result<u64, SaveError> {
    if !source.is_file() {
        return Err(SaveError::NoConvertedFile);
    }

    if is_same_file(source, destination) {
        let len = fs::metadata(source)?.len();
        log::info!("{} is already saved, nothing to copy", destination.display());
        return Ok(len);
    }

    let mut reader = BufReader::new(File::open(source)?);
    let mut writer = BufWriter::new(File::create(destination)?);
    let copied = std::io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    log::info!(
        "Saved {} bytes from {} to {}",
        copied,
        source.display(),
        destination.display()
    );
    Ok(copied)
}

/// True when `destination` exists and resolves to the same file as `source`.
fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
