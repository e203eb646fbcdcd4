//! Common test utilities and infrastructure
//!
//! Shared fixtures used across the engine integration and property suites.

pub mod fixtures;

pub use fixtures::TestFixtures;
