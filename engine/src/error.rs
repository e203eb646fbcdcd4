//! Engine-specific error types

use shared::StateCode;
use thiserror::Error;

/// Why a filter state was rejected at the filter boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterStateError {
    #[error("crime range low bound {low} exceeds high bound {high}")]
    InvertedRange { low: f64, high: f64 },

    #[error("crime range bounds must be finite (low = {low}, high = {high})")]
    NonFiniteBound { low: f64, high: f64 },

    #[error("region {state_code} is not present in the dataset")]
    UnknownRegion { state_code: StateCode },
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid filter state: {0}")]
    InvalidFilterState(#[from] FilterStateError),

    #[error("Malformed record at line {line}, column {column}: {message}")]
    MalformedRecord { line: u64, column: String, message: String },

    #[error("Failed to read dataset {path}: {source}")]
    DatasetIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Recomputation task failed: {message}")]
    TaskFailed { message: String },
}

impl EngineError {
    /// True when the caller supplied a filter that can never be satisfied
    pub fn is_invalid_filter(&self) -> bool {
        matches!(self, EngineError::InvalidFilterState(_))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
