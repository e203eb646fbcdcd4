//! Shared error types for the crime dashboard workspace

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharedError {
    #[error("Unsupported map metric: {input}")]
    UnsupportedMetric { input: String },

    #[error("Unsupported color scale: {input}")]
    UnsupportedColorScale { input: String },

    #[error("Unsupported page: {input}")]
    UnsupportedPage { input: String },

    #[error("Invalid region selection: {input}")]
    InvalidRegion { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
