//! Region code to postal abbreviation lookup
//!
//! Codes without an entry (3, 7, 14, 43, 52, ...) are expected; they keep
//! their statistics but cannot be placed on a map.

use std::collections::BTreeMap;

use crate::types::StateCode;

/// FIPS codes with a postal abbreviation
const US_STATES: [(StateCode, &str); 52] = [
    (1, "AL"),
    (2, "AK"),
    (4, "AZ"),
    (5, "AR"),
    (6, "CA"),
    (8, "CO"),
    (9, "CT"),
    (10, "DE"),
    (11, "DC"),
    (12, "FL"),
    (13, "GA"),
    (15, "HI"),
    (16, "ID"),
    (17, "IL"),
    (18, "IN"),
    (19, "IA"),
    (20, "KS"),
    (21, "KY"),
    (22, "LA"),
    (23, "ME"),
    (24, "MD"),
    (25, "MA"),
    (26, "MI"),
    (27, "MN"),
    (28, "MS"),
    (29, "MO"),
    (30, "MT"),
    (31, "NE"),
    (32, "NV"),
    (33, "NH"),
    (34, "NJ"),
    (35, "NM"),
    (36, "NY"),
    (37, "NC"),
    (38, "ND"),
    (39, "OH"),
    (40, "OK"),
    (41, "OR"),
    (42, "PA"),
    (44, "RI"),
    (45, "SC"),
    (46, "SD"),
    (47, "TN"),
    (48, "TX"),
    (49, "UT"),
    (50, "VT"),
    (51, "VA"),
    (53, "WA"),
    (54, "WV"),
    (55, "WI"),
    (56, "WY"),
    (72, "PR"),
];

/// Fixed code -> abbreviation table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    entries: BTreeMap<StateCode, String>,
}

impl RegionTable {
    /// US states, DC and Puerto Rico
    pub fn us_states() -> Self {
        Self::from_entries(US_STATES.iter().map(|(code, abbr)| (*code, abbr.to_string())))
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (StateCode, String)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn abbreviation(&self, code: StateCode) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::us_states()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_state_table() {
        let table = RegionTable::us_states();
        assert_eq!(table.len(), 52);
        assert_eq!(table.abbreviation(6), Some("CA"));
        assert_eq!(table.abbreviation(36), Some("NY"));
        assert_eq!(table.abbreviation(56), Some("WY"));
    }

    #[test]
    fn test_codes_without_abbreviation() {
        let table = RegionTable::us_states();
        for code in [3, 7, 14, 43, 52] {
            assert_eq!(table.abbreviation(code), None, "code {code} should have no entry");
        }
    }
}
