//! Serialize a small document of integers, strings, a sequence, a map, two matrices and a
//! nested record to a file, then read it back both generically (checking the shape of each
//! node) and as the typed [`Storage`].
//!
//! The file format follows the file name: see [`FileFormat::from_path`].

mod data;
mod document;
mod format;

pub use data::{Element, Mat, SomeData, Storage};
pub use document::{Document, ReadBack};
pub use format::{FileFormat, Format};

use log::*;
use std::{io, path::Path, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("XML is not supported, use a .yaml or .json name: {0:?}")]
    UnsupportedFormat(PathBuf),
    #[error("Failed to open {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("{0} is not an integer")]
    NotAnInteger(String),
    #[error("{0} is not a sequence!")]
    NotASequence(String),
    #[error("{0} element is not a string!")]
    NotAString(String),
    #[error("{0} is not a map!")]
    NotAMap(String),
    #[error("{0} does not match what was written")]
    Mismatch(PathBuf),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Write [`Storage::sample`] to `path` and return what was written.
pub fn write_some_stuff(path: impl AsRef<Path>) -> Result<Storage> {
    let storage = Storage::sample();
    storage.write(path)?;
    Ok(storage)
}

/// Read back everything [`write_some_stuff`] wrote, checking each node on the way.
pub fn read_some_stuff(path: impl AsRef<Path>) -> Result<ReadBack> {
    let path = path.as_ref();
    info!("Reading {} back", path.display());
    Document::load(path)?.read_back()
}

/// Read `path` back like [`read_some_stuff`] and check the typed document equals `written`.
pub fn verify_some_stuff(path: impl AsRef<Path>, written: &Storage) -> Result<ReadBack> {
    let path = path.as_ref();
    let back = read_some_stuff(path)?;
    if Storage::read(path)? != *written {
        return Err(Error::Mismatch(path.to_owned()));
    }
    info!("Read back everything written to {}", path.display());
    Ok(back)
}
