//! Overview page payloads
//!
//! Plain data handed to the renderer. Statistics that cannot be computed are
//! `None` so consumers can tell them apart from a legitimate zero.

use serde::{Deserialize, Serialize};

use super::record::{Attribute, StateCode};

/// Number of histogram bins on the overview page
pub const HISTOGRAM_BINS: usize = 30;

/// Regions shown in the grouped box plot
pub const BOXPLOT_REGION_LIMIT: usize = 10;

/// One scatter point per surviving record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub population: Option<f64>,
    pub violent_crimes_per_pop: f64,
    pub state_code: StateCode,
    /// Colour key; `None` for codes without an abbreviation
    pub state_abbreviation: Option<String>,
    pub med_income: Option<f64>,
    pub community_name: String,
    pub pct_urban: Option<f64>,
    pub pct_pop_under_pov: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of the target over the filtered subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Number of values that were binned
    pub total: usize,
    /// Set when the value range has zero width
    pub degenerate: bool,
}

impl Histogram {
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Box-plot statistics for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotGroup {
    pub state_code: StateCode,
    pub state_abbreviation: Option<String>,
    pub count: usize,
    pub summary: FiveNumberSummary,
}

/// Square, symmetric Pearson correlation matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub attributes: Vec<Attribute>,
    /// Row-major; `values[i][j]` correlates `attributes[i]` with `attributes[j]`
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.attributes.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Look up a cell by attribute pair
    pub fn between(&self, a: Attribute, b: Attribute) -> Option<f64> {
        let row = self.attributes.iter().position(|x| *x == a)?;
        let col = self.attributes.iter().position(|x| *x == b)?;
        self.get(row, col)
    }
}

/// Everything the overview page shows for one filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSet {
    pub scatter_points: Vec<ScatterPoint>,
    pub histogram: Histogram,
    pub boxplot_groups: Vec<BoxplotGroup>,
    pub correlation_matrix: CorrelationMatrix,
}
