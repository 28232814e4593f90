//! Crate-level error type and `Result` alias.
//! Wraps I/O, GDAL and image-encoding failures, and carries the semantic
//! variants raised by decoding, index computation and path discovery.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error(
        "Malformed raster {path:?}: expected {expected_bytes} bytes ({dimension}x{dimension} u16 samples), got {actual_bytes}"
    )]
    Format {
        path: PathBuf,
        dimension: usize,
        expected_bytes: usize,
        actual_bytes: usize,
    },

    #[error("Shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("Dataset '{dataset}' not found in {container:?}")]
    DatasetNotFound { container: PathBuf, dataset: String },

    #[error("No file matching '{pattern}' in {dir:?}")]
    PathNotFound { dir: PathBuf, pattern: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
