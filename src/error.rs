//! Error type shared by the geometry core and its collaborators

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MosaicError>;

#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    /// Tessellation input that can't produce a valid covering
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Absolute index outside an option list
    #[error("{what} index {index} out of range (0..{len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
