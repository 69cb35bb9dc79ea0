//! A support vector classifier trained on data that is only mostly separable, and pictures of
//! what it learned.

mod data;
mod draw;
mod settings;
mod svm;

pub use data::{label_data, make_data, Sample, FIRST_LABEL, SECOND_LABEL};
pub use draw::{draw_data, draw_regions, draw_support_vectors, render};
pub use settings::{KernelKind, Settings};
pub use svm::{Kernel, Svm, SvmParams};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no training data")]
    NoData,
    #[error("{samples} samples but {labels} labels")]
    LabelCount { samples: usize, labels: usize },
    #[error("expected exactly 2 distinct labels, found {0}")]
    NotTwoClasses(usize),
    #[error("the penalty C must be positive, got {0}")]
    InvalidPenalty(f64),
    #[error("the RBF gamma must be positive, got {0}")]
    InvalidGamma(f64),
    #[error("cannot scatter {count} points over a {width}x{height} image")]
    InvalidDataShape { count: usize, width: u32, height: u32 },
    #[error(transparent)]
    Common(#[from] demo_common::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
