//! Core types used throughout the crime dashboard

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub mod aggregate;
pub mod filter;
pub mod map;
pub mod overview;
pub mod page;
pub mod record;

pub use aggregate::StateAggregate;
pub use filter::{CrimeRange, FilterState, RegionSelection};
pub use map::{ChoroplethEntry, ColorScale, MapMetric, MapSelection, MapViewSet, RANKING_LIMIT, RankingEntry};
pub use overview::{
    BOXPLOT_REGION_LIMIT, BoxplotGroup, CorrelationMatrix, FiveNumberSummary, HISTOGRAM_BINS, Histogram,
    HistogramBin, ScatterPoint, ViewSet,
};
pub use page::{Controls, CrimeSlider, MetricOption, Page, RegionOption};
pub use record::{Attribute, CommunityRecord, StateCode, UNKNOWN_COMMUNITY};

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identifies which binary is emitting logs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// Page controller serving the dashboard API
    WebServer,
    /// One-shot report CLI
    Report,
}

impl ProcessId {
    /// Initialize the global process ID for the webserver
    pub fn init_webserver() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }

    /// Initialize the global process ID for the report CLI
    pub fn init_report() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Report)
    }

    /// Get the global process ID, falling back to the webserver when none was set
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::WebServer)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::WebServer => write!(f, "webserver"),
            ProcessId::Report => write!(f, "report"),
        }
    }
}
