//! Functions that wrap up the encoding functionality.

use serde::de::DeserializeOwned;
use serde::Serialize;

use std::fs::{DirBuilder, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::Error;

/// Loads a weight vector from a string.
pub(crate) fn load_str<T>(s: &str) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_str(s).map_err(Into::into)
}

/// Loads a weight vector from a file.
pub(crate) fn load_file<T, P>(path: P) -> Result<Vec<T>, Error>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(Into::into)
}

/// Encodes a weight vector to a string.
pub(crate) fn to_string<T>(weights: &[T]) -> Result<String, Error>
where
    T: Serialize,
{
    serde_json::to_string(weights).map_err(Into::into)
}

/// Encodes a weight vector to a file.
///
/// Recursively creates missing directories if `create_dirs` is `true`.
pub(crate) fn to_file<T, P>(weights: &[T], path: P, create_dirs: bool) -> Result<(), Error>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if create_dirs {
        if let Some(parent) = path.parent() {
            DirBuilder::new().recursive(true).create(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, weights)?;

    writer.flush()?;

    tracing::debug!(path = %path.display(), weights = weights.len(), "saved weights");

    Ok(())
}
