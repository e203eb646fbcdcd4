//! Map page payloads

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::aggregate::StateAggregate;
use super::record::StateCode;
use crate::errors::SharedError;

/// Regions shown in the ranking bar chart
pub const RANKING_LIMIT: usize = 15;

/// Metric the map colours regions by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapMetric {
    #[default]
    CrimeMean,
    CrimeMedian,
    Count,
}

impl MapMetric {
    pub const ALL: [MapMetric; 3] = [MapMetric::CrimeMean, MapMetric::CrimeMedian, MapMetric::Count];

    /// Value of this metric for an aggregate
    pub fn value_of(&self, aggregate: &StateAggregate) -> f64 {
        match self {
            MapMetric::CrimeMean => aggregate.crime_mean,
            MapMetric::CrimeMedian => aggregate.crime_median,
            MapMetric::Count => aggregate.count as f64,
        }
    }

    /// Dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            MapMetric::CrimeMean => "Average Crime Rate",
            MapMetric::CrimeMedian => "Median Crime Rate",
            MapMetric::Count => "Number of Communities",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MapMetric::CrimeMean => "crimeMean",
            MapMetric::CrimeMedian => "crimeMedian",
            MapMetric::Count => "count",
        }
    }
}

impl fmt::Display for MapMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapMetric {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crimeMean" | "crime_rate_mean" => Ok(MapMetric::CrimeMean),
            "crimeMedian" | "crime_rate_median" => Ok(MapMetric::CrimeMedian),
            "count" | "num_communities" => Ok(MapMetric::Count),
            _ => Err(SharedError::UnsupportedMetric { input: s.to_string() }),
        }
    }
}

/// Continuous colour scale name, passed through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorScale {
    #[default]
    Reds,
    Blues,
    Viridis,
    Plasma,
}

impl ColorScale {
    pub const ALL: [ColorScale; 4] = [ColorScale::Reds, ColorScale::Blues, ColorScale::Viridis, ColorScale::Plasma];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScale::Reds => "Reds",
            ColorScale::Blues => "Blues",
            ColorScale::Viridis => "Viridis",
            ColorScale::Plasma => "Plasma",
        }
    }
}

impl fmt::Display for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScale {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScale::ALL
            .iter()
            .copied()
            .find(|scale| scale.as_str() == s)
            .ok_or_else(|| SharedError::UnsupportedColorScale { input: s.to_string() })
    }
}

/// Map page controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapSelection {
    pub metric: MapMetric,
    pub color_scale: ColorScale,
}

impl MapSelection {
    pub fn new(metric: MapMetric, color_scale: ColorScale) -> Self {
        Self { metric, color_scale }
    }
}

/// One mappable region with the selected metric and hover fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethEntry {
    pub state_code: StateCode,
    pub state_abbreviation: String,
    pub value: f64,
    pub crime_mean: f64,
    pub count: usize,
    pub mean_income: Option<f64>,
    pub mean_poverty_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position
    pub rank: usize,
    pub state_code: StateCode,
    pub state_abbreviation: String,
    pub value: f64,
}

/// Everything the map page shows for one metric selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapViewSet {
    pub metric: MapMetric,
    pub color_scale: ColorScale,
    pub choropleth_entries: Vec<ChoroplethEntry>,
    pub ranking_entries: Vec<RankingEntry>,
}
