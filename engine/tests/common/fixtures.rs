//! Test fixtures and data for engine tests

use std::sync::Arc;

use engine::traits::MockDatasetSource;
use engine::{DashboardEngine, Dataset};
use shared::{Attribute, CommunityRecord, RegionTable};

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const CALIFORNIA: u16 = 6;
    pub const NEW_YORK: u16 = 36;
    pub const TEXAS: u16 = 48;
    /// Present in the data but without an abbreviation
    pub const UNMAPPED: u16 = 3;

    /// The three-record example: two in California, one in New York
    pub fn reference_records() -> Vec<CommunityRecord> {
        vec![
            CommunityRecord::new(Self::CALIFORNIA, 0.10).with_name("Alphacity"),
            CommunityRecord::new(Self::CALIFORNIA, 0.30).with_name("Betatown"),
            CommunityRecord::new(Self::NEW_YORK, 0.50).with_name("Gammaville"),
        ]
    }

    /// A richer dataset with socioeconomic attributes and gaps
    pub fn community_records() -> Vec<CommunityRecord> {
        let rows: [(u16, f64, Option<f64>, Option<f64>, f64); 8] = [
            (6, 0.12, Some(0.61), Some(0.10), 0.95),
            (6, 0.34, Some(0.32), Some(0.25), 0.80),
            (6, 0.08, Some(0.70), None, 0.40),
            (36, 0.55, Some(0.21), Some(0.41), 1.00),
            (36, 0.47, None, Some(0.35), 0.90),
            (48, 0.20, Some(0.45), Some(0.18), 0.60),
            (48, 0.26, Some(0.40), Some(0.22), 0.00),
            (3, 0.15, Some(0.50), Some(0.12), 0.30),
        ];

        rows.iter()
            .enumerate()
            .map(|(i, (code, crime, income, poverty, urban))| {
                let mut record = CommunityRecord::new(*code, *crime)
                    .with_name(format!("Community {i}"))
                    .with_attribute(Attribute::Population, 0.01 * (i + 1) as f64)
                    .with_attribute(Attribute::PctUrban, *urban);
                if let Some(income) = income {
                    record = record.with_attribute(Attribute::MedIncome, *income);
                }
                if let Some(poverty) = poverty {
                    record = record.with_attribute(Attribute::PctPopUnderPov, *poverty);
                }
                record
            })
            .collect()
    }

    pub fn engine(records: Vec<CommunityRecord>) -> DashboardEngine {
        DashboardEngine::new(Arc::new(Dataset::new(records, RegionTable::us_states())))
    }

    /// Mock source that yields `records` once
    pub fn mock_source(records: Vec<CommunityRecord>) -> MockDatasetSource {
        let mut source = MockDatasetSource::new();
        source.expect_load().times(1).returning(move || Ok(records.clone()));
        source.expect_describe().return_const("mock dataset".to_string());
        source
    }
}
