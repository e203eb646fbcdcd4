//! Community records and the named attributes they carry

use serde::{Deserialize, Serialize};
use std::fmt;

/// FIPS-style integer region identifier
pub type StateCode = u16;

/// Community name used when the source row has none
pub const UNKNOWN_COMMUNITY: &str = "Unknown";

/// One row of the dataset. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityRecord {
    pub state_code: StateCode,
    pub community_name: String,
    pub population: Option<f64>,
    pub med_income: Option<f64>,
    pub pct_pop_under_pov: Option<f64>,
    pub pct_unemployed: Option<f64>,
    pub pct_urban: Option<f64>,
    pub race_pct_black: Option<f64>,
    pub race_pct_white: Option<f64>,
    pub race_pct_asian: Option<f64>,
    pub race_pct_hisp: Option<f64>,
    pub pct_bs_or_more: Option<f64>,
    /// Target attribute, always present
    pub violent_crimes_per_pop: f64,
}

impl CommunityRecord {
    /// Record with only the region and target set; every other attribute missing
    pub fn new(state_code: StateCode, violent_crimes_per_pop: f64) -> Self {
        Self {
            state_code,
            community_name: UNKNOWN_COMMUNITY.to_string(),
            population: None,
            med_income: None,
            pct_pop_under_pov: None,
            pct_unemployed: None,
            pct_urban: None,
            race_pct_black: None,
            race_pct_white: None,
            race_pct_asian: None,
            race_pct_hisp: None,
            pct_bs_or_more: None,
            violent_crimes_per_pop,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.community_name = name.into();
        self
    }

    /// Set a numeric attribute. Setting the target replaces the crime rate.
    pub fn with_attribute(mut self, attribute: Attribute, value: f64) -> Self {
        match attribute {
            Attribute::ViolentCrimesPerPop => self.violent_crimes_per_pop = value,
            Attribute::Population => self.population = Some(value),
            Attribute::MedIncome => self.med_income = Some(value),
            Attribute::PctPopUnderPov => self.pct_pop_under_pov = Some(value),
            Attribute::PctUnemployed => self.pct_unemployed = Some(value),
            Attribute::PctUrban => self.pct_urban = Some(value),
            Attribute::RacePctBlack => self.race_pct_black = Some(value),
            Attribute::RacePctWhite => self.race_pct_white = Some(value),
            Attribute::RacePctAsian => self.race_pct_asian = Some(value),
            Attribute::RacePctHisp => self.race_pct_hisp = Some(value),
            Attribute::PctBsOrMore => self.pct_bs_or_more = Some(value),
        }
        self
    }

    /// Value of a named attribute, `None` when missing
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::ViolentCrimesPerPop => Some(self.violent_crimes_per_pop),
            Attribute::Population => self.population,
            Attribute::MedIncome => self.med_income,
            Attribute::PctPopUnderPov => self.pct_pop_under_pov,
            Attribute::PctUnemployed => self.pct_unemployed,
            Attribute::PctUrban => self.pct_urban,
            Attribute::RacePctBlack => self.race_pct_black,
            Attribute::RacePctWhite => self.race_pct_white,
            Attribute::RacePctAsian => self.race_pct_asian,
            Attribute::RacePctHisp => self.race_pct_hisp,
            Attribute::PctBsOrMore => self.pct_bs_or_more,
        }
    }
}

/// Numeric attributes the engine knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "ViolentCrimesPerPop")]
    ViolentCrimesPerPop,
    #[serde(rename = "population")]
    Population,
    #[serde(rename = "medIncome")]
    MedIncome,
    #[serde(rename = "PctPopUnderPov")]
    PctPopUnderPov,
    #[serde(rename = "PctUnemployed")]
    PctUnemployed,
    #[serde(rename = "pctUrban")]
    PctUrban,
    #[serde(rename = "racepctblack")]
    RacePctBlack,
    #[serde(rename = "racePctWhite")]
    RacePctWhite,
    #[serde(rename = "racePctAsian")]
    RacePctAsian,
    #[serde(rename = "racePctHisp")]
    RacePctHisp,
    #[serde(rename = "PctBSorMore")]
    PctBsOrMore,
}

impl Attribute {
    /// Row/column order of the correlation matrix
    pub const CORRELATION_SET: [Attribute; 9] = [
        Attribute::ViolentCrimesPerPop,
        Attribute::MedIncome,
        Attribute::PctPopUnderPov,
        Attribute::PctUnemployed,
        Attribute::PctUrban,
        Attribute::Population,
        Attribute::RacePctBlack,
        Attribute::RacePctWhite,
        Attribute::PctBsOrMore,
    ];

    pub const ALL: [Attribute; 11] = [
        Attribute::ViolentCrimesPerPop,
        Attribute::Population,
        Attribute::MedIncome,
        Attribute::PctPopUnderPov,
        Attribute::PctUnemployed,
        Attribute::PctUrban,
        Attribute::RacePctBlack,
        Attribute::RacePctWhite,
        Attribute::RacePctAsian,
        Attribute::RacePctHisp,
        Attribute::PctBsOrMore,
    ];

    /// Column name in the source data file
    pub fn column_name(&self) -> &'static str {
        match self {
            Attribute::ViolentCrimesPerPop => "ViolentCrimesPerPop",
            Attribute::Population => "population",
            Attribute::MedIncome => "medIncome",
            Attribute::PctPopUnderPov => "PctPopUnderPov",
            Attribute::PctUnemployed => "PctUnemployed",
            Attribute::PctUrban => "pctUrban",
            Attribute::RacePctBlack => "racepctblack",
            Attribute::RacePctWhite => "racePctWhite",
            Attribute::RacePctAsian => "racePctAsian",
            Attribute::RacePctHisp => "racePctHisp",
            Attribute::PctBsOrMore => "PctBSorMore",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}
