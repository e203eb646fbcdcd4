//! Grouped box-plot dataset for the busiest regions in the subset

use std::collections::BTreeMap;

use shared::{BOXPLOT_REGION_LIMIT, BoxplotGroup, CommunityRecord, RegionTable, StateCode};

use crate::core::stats;

/// Five-number summaries for the `BOXPLOT_REGION_LIMIT` regions with the most records
pub fn boxplot_groups(subset: &[&CommunityRecord], regions: &RegionTable) -> Vec<BoxplotGroup> {
    boxplot_groups_limited(subset, regions, BOXPLOT_REGION_LIMIT)
}

/// Groups ordered by count descending, ties by ascending region code
pub fn boxplot_groups_limited(
    subset: &[&CommunityRecord],
    regions: &RegionTable,
    limit: usize,
) -> Vec<BoxplotGroup> {
    let mut by_region: BTreeMap<StateCode, Vec<f64>> = BTreeMap::new();
    for record in subset {
        by_region
            .entry(record.state_code)
            .or_default()
            .push(record.violent_crimes_per_pop);
    }

    let mut ranked: Vec<(StateCode, Vec<f64>)> = by_region.into_iter().collect();
    // Stable sort keeps ascending code order among equal counts
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .filter_map(|(state_code, values)| {
            let summary = stats::five_number_summary(&values)?;
            Some(BoxplotGroup {
                state_code,
                state_abbreviation: regions.abbreviation(state_code).map(str::to_string),
                count: values.len(),
                summary,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_for(counts: &[(StateCode, usize)]) -> Vec<CommunityRecord> {
        counts
            .iter()
            .flat_map(|(code, n)| (0..*n).map(move |i| CommunityRecord::new(*code, 0.1 * (i + 1) as f64)))
            .collect()
    }

    #[test]
    fn test_top_regions_by_count_with_code_tiebreak() {
        let records = records_for(&[(36, 2), (6, 3), (1, 2), (48, 1)]);
        let subset: Vec<&CommunityRecord> = records.iter().collect();
        let groups = boxplot_groups_limited(&subset, &RegionTable::us_states(), 3);

        let codes: Vec<StateCode> = groups.iter().map(|g| g.state_code).collect();
        assert_eq!(codes, vec![6, 1, 36]);
        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[0].state_abbreviation.as_deref(), Some("CA"));
    }

    #[test]
    fn test_limit_of_ten() {
        let counts: Vec<(StateCode, usize)> = (1..=12).map(|code| (code as StateCode, 1)).collect();
        let records = records_for(&counts);
        let subset: Vec<&CommunityRecord> = records.iter().collect();
        let groups = boxplot_groups(&subset, &RegionTable::us_states());
        assert_eq!(groups.len(), BOXPLOT_REGION_LIMIT);
        assert_eq!(groups.last().unwrap().state_code, 10);
    }

    #[test]
    fn test_summary_values() {
        let records = records_for(&[(6, 4)]);
        let subset: Vec<&CommunityRecord> = records.iter().collect();
        let groups = boxplot_groups(&subset, &RegionTable::us_states());
        let summary = groups[0].summary;
        assert!((summary.min - 0.1).abs() < 1e-12);
        assert!((summary.median - 0.25).abs() < 1e-12);
        assert!((summary.max - 0.4).abs() < 1e-12);
        assert!(summary.q1 <= summary.median && summary.median <= summary.q3);
    }

    #[test]
    fn test_empty_subset() {
        assert!(boxplot_groups(&[], &RegionTable::us_states()).is_empty());
    }
}
