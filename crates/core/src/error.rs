//! Error types for cropstress

use crate::band::BandKind;
use thiserror::Error;

/// Main error type for cropstress operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required band: {band}")]
    MissingBand { band: BandKind },

    #[error("Expected exactly {expected} bands, got {actual}")]
    BandCount { expected: usize, actual: usize },

    #[error("Band '{band}' size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    BandSizeMismatch {
        band: BandKind,
        er: usize,
        ec: usize,
        ar: usize,
        ac: usize,
    },

    #[error("Raster size mismatch: expected ({er}, {ec}), got ({ar}, {ac})")]
    SizeMismatch { er: usize, ec: usize, ar: usize, ac: usize },

    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Index out of bounds: ({row}, {col}) in raster of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Classifier artifact not found at '{path}'")]
    ModelUnavailable { path: String },

    #[error("Invalid classifier artifact: {0}")]
    InvalidArtifact(String),

    #[error("Unsupported data type: {0}")]
    UnsupportedDataType(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error is a client-input validation failure
    /// (as opposed to an internal or environmental one).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingBand { .. }
                | Error::BandCount { .. }
                | Error::BandSizeMismatch { .. }
                | Error::SizeMismatch { .. }
                | Error::InvalidDimensions { .. }
        )
    }
}

/// Result type alias for cropstress operations
pub type Result<T> = std::result::Result<T, Error>;
