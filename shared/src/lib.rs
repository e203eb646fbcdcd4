//! Shared types for the crime dashboard workspace
//!
//! Contains the data model exchanged between the engine, the page
//! controller and the report CLI, plus logging helpers used by every binary.

pub mod errors;
pub mod logging;
pub mod regions;
pub mod types;

pub use errors::*;
pub use regions::RegionTable;
pub use types::*;
