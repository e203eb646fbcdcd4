//! Crime dashboard engine
//!
//! Aggregates, filters and turns the Communities and Crime dataset into
//! renderer-ready view payloads. The `core` module is pure; `services` holds
//! the dataset loader and last-write-wins publication.

pub mod core;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use self::core::{FilterEngine, StateAggregator};
pub use dataset::Dataset;
pub use engine::DashboardEngine;
pub use error::{EngineError, EngineResult, FilterStateError};
pub use services::{CsvDatasetSource, LatestWins, Outcome, Publication, PublicationReceiver};
pub use traits::DatasetSource;
