//! Region-level aggregation of community records
//!
//! Pure business logic: the same records always produce bit-identical
//! aggregates, ordered by ascending region code.

use std::collections::BTreeMap;

use shared::{CommunityRecord, RegionTable, StateAggregate, StateCode};

use super::stats;

/// Reduces records into one aggregate per region code
#[derive(Debug, Clone)]
pub struct StateAggregator {
    regions: RegionTable,
}

impl StateAggregator {
    pub fn new(regions: RegionTable) -> Self {
        Self { regions }
    }

    /// Group records by region and summarise each group
    pub fn aggregate(&self, records: &[CommunityRecord]) -> Vec<StateAggregate> {
        let mut groups: BTreeMap<StateCode, Vec<&CommunityRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.state_code).or_default().push(record);
        }

        groups
            .into_iter()
            .map(|(state_code, members)| self.summarise(state_code, &members))
            .collect()
    }

    fn summarise(&self, state_code: StateCode, members: &[&CommunityRecord]) -> StateAggregate {
        let crime: Vec<f64> = members.iter().map(|r| r.violent_crimes_per_pop).collect();

        // Present values only; an all-missing group has an undefined mean
        let present = |pick: fn(&CommunityRecord) -> Option<f64>| -> Vec<f64> {
            members.iter().filter_map(|r| pick(r)).collect()
        };

        StateAggregate {
            state_code,
            state_abbreviation: self.regions.abbreviation(state_code).map(str::to_string),
            count: members.len(),
            // Groups are never empty, so the target statistics are always defined
            crime_mean: stats::mean(&crime).unwrap_or(f64::NAN),
            crime_median: stats::median(&crime).unwrap_or(f64::NAN),
            crime_std_dev: stats::sample_std_dev(&crime),
            total_population: present(|r| r.population).iter().sum(),
            mean_income: stats::mean(&present(|r| r.med_income)),
            mean_poverty_pct: stats::mean(&present(|r| r.pct_pop_under_pov)),
            mean_urban_pct: stats::mean(&present(|r| r.pct_urban)),
        }
    }
}

impl Default for StateAggregator {
    fn default() -> Self {
        Self::new(RegionTable::us_states())
    }
}

/// Aggregate with the standard US region table
pub fn aggregate(records: &[CommunityRecord]) -> Vec<StateAggregate> {
    StateAggregator::default().aggregate(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Attribute;

    const EPS: f64 = 1e-12;

    fn sample_records() -> Vec<CommunityRecord> {
        vec![
            CommunityRecord::new(6, 0.10),
            CommunityRecord::new(6, 0.30),
            CommunityRecord::new(36, 0.50),
        ]
    }

    #[test]
    fn test_aggregate_reference_example() {
        let aggregates = aggregate(&sample_records());
        assert_eq!(aggregates.len(), 2);

        let ca = &aggregates[0];
        assert_eq!(ca.state_code, 6);
        assert_eq!(ca.state_abbreviation.as_deref(), Some("CA"));
        assert_eq!(ca.count, 2);
        assert!((ca.crime_mean - 0.20).abs() < EPS);
        assert!((ca.crime_median - 0.20).abs() < EPS);
        assert!((ca.crime_std_dev.unwrap() - 0.02f64.sqrt()).abs() < EPS);

        let ny = &aggregates[1];
        assert_eq!(ny.state_code, 36);
        assert_eq!(ny.count, 1);
        assert!((ny.crime_mean - 0.50).abs() < EPS);
        assert_eq!(ny.crime_std_dev, None);
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_means_skip_missing_values() {
        let records = vec![
            CommunityRecord::new(6, 0.1).with_attribute(Attribute::MedIncome, 0.4),
            CommunityRecord::new(6, 0.2),
            CommunityRecord::new(6, 0.3).with_attribute(Attribute::MedIncome, 0.6),
        ];
        let aggregates = aggregate(&records);
        let ca = &aggregates[0];
        assert!((ca.mean_income.unwrap() - 0.5).abs() < EPS);
        // Nobody reports poverty or urban share
        assert_eq!(ca.mean_poverty_pct, None);
        assert_eq!(ca.mean_urban_pct, None);
    }

    #[test]
    fn test_population_is_summed() {
        let records = vec![
            CommunityRecord::new(1, 0.1).with_attribute(Attribute::Population, 0.25),
            CommunityRecord::new(1, 0.2).with_attribute(Attribute::Population, 0.5),
            CommunityRecord::new(1, 0.3),
        ];
        let aggregates = aggregate(&records);
        assert!((aggregates[0].total_population - 0.75).abs() < EPS);
    }

    #[test]
    fn test_unmapped_codes_are_kept_without_abbreviation() {
        let records = vec![CommunityRecord::new(3, 0.1), CommunityRecord::new(6, 0.2)];
        let aggregates = aggregate(&records);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].state_code, 3);
        assert_eq!(aggregates[0].state_abbreviation, None);
        assert!(!aggregates[0].is_mappable());
    }

    #[test]
    fn test_counts_sum_to_record_count_and_are_idempotent() {
        let records = sample_records();
        let first = aggregate(&records);
        let second = aggregate(&records);
        assert_eq!(first.iter().map(|a| a.count).sum::<usize>(), records.len());
        assert_eq!(first, second);
    }
}
