//! Error types for buffer construction and parameter loading
//!
//! The detection path itself never fails: unusable input degrades to an empty
//! result. Errors only surface where data enters the crate.

use thiserror::Error;

/// Reasons a raw RGBA byte array cannot back a [`PixelBuffer`](crate::PixelBuffer)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Width or height is zero
    #[error("invalid buffer dimensions: {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    /// Byte count does not match `width * height * 4`
    #[error("buffer length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// `width * height * 4` does not fit in `usize`
    #[error("buffer dimensions overflow: {width}x{height}")]
    Overflow { width: usize, height: usize },
}

/// Failures while loading [`DetectionParameters`](crate::DetectionParameters) from disk
#[derive(Error, Debug)]
pub enum ParamsError {
    /// The parameter file could not be read
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    /// The parameter file is not valid JSON for the parameter set
    #[error("invalid parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while loading an image file into a [`PixelBuffer`](crate::PixelBuffer)
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or decoded
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),

    /// The decoded pixels do not form a valid buffer
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
