//! Dashboard engine facade
//!
//! Pairs the immutable dataset with the pure core: one call per page event,
//! returning the complete payload for that page.

use std::sync::Arc;

use shared::{Controls, FilterState, MapSelection, MapViewSet, ViewSet};

use crate::core::{FilterEngine, build_map_view_set, build_view_set, filter};
use crate::dataset::Dataset;
use crate::error::EngineResult;

/// Cheap to clone; every clone shares the same dataset
#[derive(Debug, Clone)]
pub struct DashboardEngine {
    dataset: Arc<Dataset>,
    filter: FilterEngine,
}

impl DashboardEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let filter = FilterEngine::new(Arc::clone(&dataset));
        Self { dataset, filter }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn controls(&self) -> Controls {
        self.dataset.controls()
    }

    /// Reject a filter that could never be applied
    pub fn validate_filter(&self, state: &FilterState) -> EngineResult<()> {
        filter::validate(state, |code| self.dataset.contains_region(code))?;
        Ok(())
    }

    /// Overview page payload for one filter state
    pub fn overview(&self, state: &FilterState) -> EngineResult<ViewSet> {
        let subset = self.filter.filter(state)?;
        Ok(build_view_set(&subset, self.dataset.regions()))
    }

    /// Map page payload; the aggregates are fixed, only the metric varies
    pub fn map(&self, selection: MapSelection) -> MapViewSet {
        build_map_view_set(self.dataset.aggregates(), selection)
    }
}
