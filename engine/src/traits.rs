//! Trait definitions with mockall annotations for testing
//!
//! The dataset is the only external input the engine depends on; abstracting
//! it lets the page controller, the report CLI and the tests inject sources.

use shared::CommunityRecord;

use crate::error::EngineResult;

/// Source of community records, consulted once at startup
#[mockall::automock]
#[async_trait::async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load every valid record in file order
    ///
    /// # Returns
    /// The records whose target value is present, or a `MalformedRecord`
    /// error for the first row that cannot be parsed
    async fn load(&self) -> EngineResult<Vec<CommunityRecord>>;

    /// Human-readable origin of the data, used in log lines
    fn describe(&self) -> String;
}
