//! Pure business logic for the dashboard: no I/O, no shared state
pub mod aggregator;
pub mod filter;
pub mod stats;
pub mod views;

pub use aggregator::{StateAggregator, aggregate};
pub use filter::FilterEngine;
pub use views::{build_map_view_set, build_view_set};
