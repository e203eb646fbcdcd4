//! Filter engine for the overview page
//!
//! A record survives iff its region matches the selection and its crime rate
//! lies inside the inclusive range. Invalid filter states are rejected before
//! any record is inspected, so an empty result always means "valid filter,
//! no matches".

use std::sync::Arc;

use shared::{CommunityRecord, FilterState, RegionSelection, StateCode};

use crate::dataset::Dataset;
use crate::error::{EngineResult, FilterStateError};

/// Check a filter state against the set of region codes present in the data
pub fn validate<F>(state: &FilterState, region_known: F) -> Result<(), FilterStateError>
where
    F: Fn(StateCode) -> bool,
{
    let range = state.crime_range;
    if !range.low.is_finite() || !range.high.is_finite() {
        return Err(FilterStateError::NonFiniteBound {
            low: range.low,
            high: range.high,
        });
    }
    if range.low > range.high {
        return Err(FilterStateError::InvertedRange {
            low: range.low,
            high: range.high,
        });
    }
    if let RegionSelection::State(state_code) = state.selected_region {
        if !region_known(state_code) {
            return Err(FilterStateError::UnknownRegion { state_code });
        }
    }
    Ok(())
}

/// Apply an already validated filter, preserving input order
pub fn apply<'a>(records: &'a [CommunityRecord], state: &FilterState) -> Vec<&'a CommunityRecord> {
    records
        .iter()
        .filter(|record| {
            state.selected_region.matches(record.state_code)
                && state.crime_range.contains(record.violent_crimes_per_pop)
        })
        .collect()
}

/// Validate against the regions present in `records`, then filter
pub fn filter<'a>(records: &'a [CommunityRecord], state: &FilterState) -> EngineResult<Vec<&'a CommunityRecord>> {
    validate(state, |code| records.iter().any(|r| r.state_code == code))?;
    Ok(apply(records, state))
}

/// Filter engine bound to one immutable dataset
#[derive(Debug, Clone)]
pub struct FilterEngine {
    dataset: Arc<Dataset>,
}

impl FilterEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn filter(&self, state: &FilterState) -> EngineResult<Vec<&CommunityRecord>> {
        validate(state, |code| self.dataset.contains_region(code))?;
        let subset = apply(self.dataset.records(), state);

        tracing::debug!(
            region = %state.selected_region,
            low = state.crime_range.low,
            high = state.crime_range.high,
            matched = subset.len(),
            "Applied filter"
        );
        Ok(subset)
    }
}
