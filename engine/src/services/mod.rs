//! Service implementations
//!
//! I/O-facing pieces around the pure core: loading the dataset from disk and
//! publishing recomputed views.

pub mod loader;
pub mod recompute;

mod tests;

pub use loader::{CsvDatasetSource, ParsedRows, parse_records};
pub use recompute::{LatestWins, Outcome, Publication, PublicationReceiver};
