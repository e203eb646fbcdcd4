//! Overview-page filter state

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::record::StateCode;
use crate::errors::SharedError;

/// Region dropdown selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionSelection {
    #[default]
    All,
    State(StateCode),
}

impl RegionSelection {
    pub fn matches(&self, state_code: StateCode) -> bool {
        match self {
            RegionSelection::All => true,
            RegionSelection::State(code) => *code == state_code,
        }
    }
}

impl fmt::Display for RegionSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionSelection::All => write!(f, "all"),
            RegionSelection::State(code) => write!(f, "{code}"),
        }
    }
}

impl FromStr for RegionSelection {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(RegionSelection::All);
        }
        trimmed
            .parse::<StateCode>()
            .map(RegionSelection::State)
            .map_err(|_| SharedError::InvalidRegion { input: s.to_string() })
    }
}

// Serialized as the dropdown value: "all" or the numeric code
impl Serialize for RegionSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RegionSelection::All => serializer.serialize_str("all"),
            RegionSelection::State(code) => serializer.serialize_u16(*code),
        }
    }
}

impl<'de> Deserialize<'de> for RegionSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(StateCode),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Code(code) => Ok(RegionSelection::State(code)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Inclusive crime-rate bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrimeRange {
    pub low: f64,
    pub high: f64,
}

impl CrimeRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Current overview filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_region: RegionSelection,
    pub crime_range: CrimeRange,
}

impl FilterState {
    pub fn new(selected_region: RegionSelection, low: f64, high: f64) -> Self {
        Self {
            selected_region,
            crime_range: CrimeRange::new(low, high),
        }
    }
}
