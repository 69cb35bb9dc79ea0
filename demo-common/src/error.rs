use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures shared by all demo programs.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open image {path:?}: {source}")]
    OpenImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to save image {path:?}: {source}")]
    SaveImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to parse settings {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("nothing to render")]
    EmptyMosaic,
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
