// error.rs - Errors surfaced by a batch run

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OptimizeError>;

/// Every failure aborts the whole batch. Variants that concern a file carry
/// its path so the shell can tell the user which image was the problem.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("no images were supplied")]
    EmptyInput,

    #[error("minimum dimension must be greater than 0")]
    InvalidMinDimension,

    #[error("quality must be between 0 and 100, got {0}")]
    InvalidQuality(u8),

    #[error("destination directory {} does not exist", .0.display())]
    DestinationNotFound(PathBuf),

    #[error("cannot read image {}: {source}", path.display())]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("output {} would overwrite its source image", .0.display())]
    WouldOverwriteSource(PathBuf),

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan destination {}: {source}", path.display())]
    DestinationScan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("source images total zero bytes")]
    ZeroSourceBytes,
}

impl OptimizeError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: impl Into<image::ImageError>) -> Self {
        Self::UnreadableImage {
            path: path.into(),
            source: source.into(),
        }
    }
}
