//! Page routing and the control data each page is initialised with

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::filter::{FilterState, RegionSelection};
use super::map::{ColorScale, MapMetric, MapSelection};
use crate::errors::SharedError;

/// Dashboard pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Overview,
    Map,
}

impl Page {
    /// Resolve a URL path; anything other than `/map` is the overview
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/map" | "map" => Page::Map,
            _ => Page::Overview,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Page::Overview => "/",
            Page::Map => "/map",
        }
    }
}

impl FromStr for Page {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(Page::Overview),
            "map" => Ok(Page::Map),
            _ => Err(SharedError::UnsupportedPage { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Overview => write!(f, "overview"),
            Page::Map => write!(f, "map"),
        }
    }
}

/// Region dropdown entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionOption {
    pub label: String,
    pub value: RegionSelection,
}

/// Crime range slider bounds and end marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrimeSlider {
    pub min: f64,
    pub max: f64,
    pub min_mark: String,
    pub max_mark: String,
}

impl CrimeSlider {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_mark: format!("{min:.2}"),
            max_mark: format!("{max:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricOption {
    pub label: String,
    pub value: MapMetric,
}

/// Everything needed to render both pages' control panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    pub regions: Vec<RegionOption>,
    pub crime_slider: CrimeSlider,
    pub default_filter: FilterState,
    pub metrics: Vec<MetricOption>,
    pub color_scales: Vec<ColorScale>,
    pub default_map: MapSelection,
}
