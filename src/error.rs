use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceBatchError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image to {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("padded crop region has no overlap with the image")]
    EmptyCrop,

    #[error("failed to load face detection model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("face detection panicked: {0}")]
    DetectorPanic(String),

    #[error("padding must be non-negative, got {0}")]
    InvalidPadding(f64),

    #[error("failed to build worker pool: {0}")]
    Pool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
