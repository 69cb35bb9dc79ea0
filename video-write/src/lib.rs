//! Animated GIF capture and writing, and splitting frames into their color channels.

mod capture;
mod channel;
mod writer;

pub use capture::VideoCapture;
pub use channel::{split_channel, Channel};
pub use writer::VideoWriter;

use std::path::PathBuf;
use thiserror::Error;

/// The only codec frames are read and written with.
pub const CODEC: &str = "GIF";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open video {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode video {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to write video {path:?}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to finish video {path:?}: {source}")]
    Close {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("video {0:?} has no frames")]
    NoFrames(PathBuf),
    #[error("frame is {found:?} but the video is {expected:?}")]
    FrameSize {
        expected: (u32, u32),
        found: (u32, u32),
    },
    #[error(transparent)]
    Common(#[from] demo_common::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
