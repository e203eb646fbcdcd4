//! View builders
//!
//! Total functions from a filtered subset (or the aggregates) to renderer
//! payloads. Empty input gives empty or degenerate output, never an error.

pub mod boxplot;
pub mod correlation;
pub mod histogram;
pub mod map;
pub mod scatter;

use shared::{CommunityRecord, RegionTable, ViewSet};

pub use boxplot::boxplot_groups;
pub use correlation::correlation_matrix;
pub use histogram::histogram;
pub use map::{build_map_view_set, choropleth, ranking};
pub use scatter::scatter_points;

/// All overview payloads for one filtered subset
pub fn build_view_set(subset: &[&CommunityRecord], regions: &RegionTable) -> ViewSet {
    ViewSet {
        scatter_points: scatter_points(subset, regions),
        histogram: histogram(subset),
        boxplot_groups: boxplot_groups(subset, regions),
        correlation_matrix: correlation_matrix(subset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::HISTOGRAM_BINS;

    #[test]
    fn test_empty_subset_builds_well_typed_view_set() {
        let view = build_view_set(&[], &RegionTable::us_states());
        assert!(view.scatter_points.is_empty());
        assert_eq!(view.histogram.bins.len(), HISTOGRAM_BINS);
        assert!(view.histogram.counts().iter().all(|c| *c == 0));
        assert!(view.boxplot_groups.is_empty());
        assert!(view.correlation_matrix.values.iter().flatten().all(Option::is_none));
    }

    #[test]
    fn test_view_set_sizes_follow_subset() {
        let records = vec![
            CommunityRecord::new(6, 0.1),
            CommunityRecord::new(6, 0.3),
            CommunityRecord::new(36, 0.5),
        ];
        let subset: Vec<&CommunityRecord> = records.iter().collect();
        let view = build_view_set(&subset, &RegionTable::us_states());
        assert_eq!(view.scatter_points.len(), 3);
        assert_eq!(view.histogram.total, 3);
        assert_eq!(view.histogram.counts().iter().sum::<usize>(), 3);
        assert_eq!(view.boxplot_groups.len(), 2);
        assert_eq!(view.boxplot_groups[0].state_code, 6);
    }
}
