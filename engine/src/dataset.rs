//! Immutable dataset handle
//!
//! Built once at startup from a `DatasetSource`, then shared read-only. The
//! region aggregates, crime bounds and region code set are derived here so
//! no request ever recomputes them.

use std::collections::BTreeSet;

use shared::{
    ColorScale, CommunityRecord, Controls, CrimeRange, CrimeSlider, FilterState, MapMetric, MapSelection,
    MetricOption, ProcessId, RegionOption, RegionSelection, RegionTable, StateAggregate, StateCode,
    process_info,
};

use crate::core::StateAggregator;
use crate::error::EngineResult;
use crate::traits::DatasetSource;

pub const ALL_REGIONS_LABEL: &str = "All States";

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CommunityRecord>,
    regions: RegionTable,
    aggregates: Vec<StateAggregate>,
    state_codes: BTreeSet<StateCode>,
    crime_bounds: Option<CrimeRange>,
}

impl Dataset {
    pub fn new(records: Vec<CommunityRecord>, regions: RegionTable) -> Self {
        let aggregates = StateAggregator::new(regions.clone()).aggregate(&records);
        let state_codes = records.iter().map(|r| r.state_code).collect();
        let crime_bounds = records.iter().map(|r| r.violent_crimes_per_pop).fold(None::<CrimeRange>, |acc, v| {
            Some(match acc {
                None => CrimeRange::new(v, v),
                Some(range) => CrimeRange::new(range.low.min(v), range.high.max(v)),
            })
        });

        Self {
            records,
            regions,
            aggregates,
            state_codes,
            crime_bounds,
        }
    }

    /// One-time initialisation from a source
    pub async fn from_source<S>(source: &S, regions: RegionTable) -> EngineResult<Self>
    where
        S: DatasetSource + ?Sized,
    {
        let records = source.load().await?;
        let dataset = Self::new(records, regions);

        process_info!(
            ProcessId::current(),
            "📊 Loaded {} records across {} regions from {}",
            dataset.len(),
            dataset.aggregates.len(),
            source.describe()
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[CommunityRecord] {
        &self.records
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Per-region aggregates in ascending code order
    pub fn aggregates(&self) -> &[StateAggregate] {
        &self.aggregates
    }

    pub fn state_codes(&self) -> &BTreeSet<StateCode> {
        &self.state_codes
    }

    pub fn contains_region(&self, state_code: StateCode) -> bool {
        self.state_codes.contains(&state_code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Smallest and largest crime rate, `None` for an empty dataset
    pub fn crime_bounds(&self) -> Option<CrimeRange> {
        self.crime_bounds
    }

    /// All regions over the full crime range
    pub fn initial_filter(&self) -> FilterState {
        let range = self.crime_bounds.unwrap_or(CrimeRange::new(0.0, 0.0));
        FilterState::new(RegionSelection::All, range.low, range.high)
    }

    /// Region dropdown: "All States" then every mappable region by ascending code
    pub fn region_options(&self) -> Vec<RegionOption> {
        let mut options = vec![RegionOption {
            label: ALL_REGIONS_LABEL.to_string(),
            value: RegionSelection::All,
        }];
        options.extend(self.aggregates.iter().filter_map(|aggregate| {
            let abbreviation = aggregate.state_abbreviation.as_deref()?;
            Some(RegionOption {
                label: format!("{} (State {})", abbreviation, aggregate.state_code),
                value: RegionSelection::State(aggregate.state_code),
            })
        }));
        options
    }

    pub fn crime_slider(&self) -> CrimeSlider {
        let range = self.initial_filter().crime_range;
        CrimeSlider::new(range.low, range.high)
    }

    /// Everything the page controller needs to render its inputs
    pub fn controls(&self) -> Controls {
        Controls {
            regions: self.region_options(),
            crime_slider: self.crime_slider(),
            default_filter: self.initial_filter(),
            metrics: MapMetric::ALL
                .iter()
                .map(|metric| MetricOption {
                    label: metric.label().to_string(),
                    value: *metric,
                })
                .collect(),
            color_scales: ColorScale::ALL.to_vec(),
            default_map: MapSelection::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::traits::MockDatasetSource;

    fn sample_dataset() -> Dataset {
        Dataset::new(
            vec![
                CommunityRecord::new(6, 0.10),
                CommunityRecord::new(6, 0.30),
                CommunityRecord::new(36, 0.50),
                CommunityRecord::new(3, 0.05),
            ],
            RegionTable::us_states(),
        )
    }

    #[test]
    fn test_derived_state() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.aggregates().len(), 3);
        assert!(dataset.contains_region(3));
        assert!(!dataset.contains_region(48));
        assert_eq!(dataset.crime_bounds(), Some(CrimeRange::new(0.05, 0.50)));
    }

    #[test]
    fn test_initial_filter_covers_everything() {
        let dataset = sample_dataset();
        let filter = dataset.initial_filter();
        assert_eq!(filter.selected_region, RegionSelection::All);
        assert_eq!(filter.crime_range, CrimeRange::new(0.05, 0.50));
    }

    #[test]
    fn test_region_options_skip_unmapped_codes() {
        let options = sample_dataset().region_options();
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["All States", "CA (State 6)", "NY (State 36)"]);
        assert_eq!(options[1].value, RegionSelection::State(6));
    }

    #[test]
    fn test_controls_defaults() {
        let controls = sample_dataset().controls();
        assert_eq!(controls.crime_slider.min_mark, "0.05");
        assert_eq!(controls.crime_slider.max_mark, "0.50");
        assert_eq!(controls.metrics.len(), 3);
        assert_eq!(controls.metrics[0].label, "Average Crime Rate");
        assert_eq!(controls.color_scales.len(), 4);
        assert_eq!(controls.default_map, MapSelection::new(MapMetric::CrimeMean, ColorScale::Reds));
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(Vec::new(), RegionTable::us_states());
        assert!(dataset.is_empty());
        assert_eq!(dataset.crime_bounds(), None);
        assert_eq!(dataset.initial_filter().crime_range, CrimeRange::new(0.0, 0.0));
        assert_eq!(dataset.region_options().len(), 1);
    }

    #[tokio::test]
    async fn test_from_source_uses_loaded_records() {
        let mut source = MockDatasetSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|| Ok(vec![CommunityRecord::new(6, 0.2)]));
        source.expect_describe().returning(|| "mock".to_string());

        let dataset = Dataset::from_source(&source, RegionTable::us_states()).await.unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.aggregates()[0].state_abbreviation.as_deref(), Some("CA"));
    }

    #[tokio::test]
    async fn test_from_source_propagates_load_errors() {
        let mut source = MockDatasetSource::new();
        source.expect_load().returning(|| {
            Err(EngineError::MalformedRecord {
                line: 4,
                column: "state".to_string(),
                message: "missing".to_string(),
            })
        });

        let result = Dataset::from_source(&source, RegionTable::us_states()).await;
        assert!(matches!(result, Err(EngineError::MalformedRecord { line: 4, .. })));
    }
}
