//! Region-level aggregates feeding the map page

use serde::{Deserialize, Serialize};

use super::record::StateCode;

/// Statistics for every record sharing one `state_code`
///
/// Undefined statistics are `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAggregate {
    pub state_code: StateCode,
    /// Absent when the code has no entry in the region table
    pub state_abbreviation: Option<String>,
    pub count: usize,
    pub crime_mean: f64,
    pub crime_median: f64,
    /// Sample standard deviation, `None` when `count < 2`
    pub crime_std_dev: Option<f64>,
    pub total_population: f64,
    pub mean_income: Option<f64>,
    pub mean_poverty_pct: Option<f64>,
    pub mean_urban_pct: Option<f64>,
}

impl StateAggregate {
    /// Whether the aggregate can appear on a geographic rendering
    pub fn is_mappable(&self) -> bool {
        self.state_abbreviation.is_some()
    }
}
