//! Scatter dataset: one point per surviving record

use shared::{CommunityRecord, RegionTable, ScatterPoint};

pub fn scatter_points(subset: &[&CommunityRecord], regions: &RegionTable) -> Vec<ScatterPoint> {
    subset
        .iter()
        .map(|record| ScatterPoint {
            population: record.population,
            violent_crimes_per_pop: record.violent_crimes_per_pop,
            state_code: record.state_code,
            state_abbreviation: regions.abbreviation(record.state_code).map(str::to_string),
            med_income: record.med_income,
            community_name: record.community_name.clone(),
            pct_urban: record.pct_urban,
            pct_pop_under_pov: record.pct_pop_under_pov,
        })
        .collect()
}
