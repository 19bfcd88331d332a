//! Error types for rastflow

use thiserror::Error;

/// Main error type for rastflow operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF error: {0}")]
    Tiff(String),

    #[error("Unsupported TIFF pixel format: {0}")]
    UnsupportedDataType(String),

    #[error("Invalid raster dimensions: {cols}x{rows}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Expected {expected} header lines, found {found}")]
    HeaderTooShort { expected: usize, found: usize },

    #[error("Header line {line} ({key}): cannot parse {token:?} as a number")]
    BadHeaderValue {
        line: usize,
        key: &'static str,
        token: String,
    },

    #[error("Data row {row}: cannot parse {token:?} as a number")]
    BadDataValue { row: usize, token: String },

    #[error("Data row {row}: expected {expected} columns, found {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} data rows, found {found}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("Row width mismatch: grid is {expected} wide, appended row has {found} values")]
    RowWidthMismatch { expected: usize, found: usize },
}

/// Result type alias for rastflow operations
pub type Result<T> = std::result::Result<T, Error>;
