//! CSV-backed dataset source
//!
//! Reads the headerless UCI Communities and Crime file. Every row has 128
//! comma-separated fields in a fixed order; `?` marks a missing value.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord, Trim};
use tokio::fs;

use shared::{Attribute, CommunityRecord, ProcessId, StateCode, UNKNOWN_COMMUNITY, process_debug, process_warn};

use crate::error::{EngineError, EngineResult};
use crate::traits::DatasetSource;

/// Marker the file uses for an absent value
pub const MISSING: &str = "?";

/// Column names in file order
pub const COLUMNS: [&str; 128] = [
    "state", "county", "community", "communityname", "fold",
    "population", "householdsize", "racepctblack", "racePctWhite", "racePctAsian",
    "racePctHisp", "agePct12t21", "agePct12t29", "agePct16t24", "agePct65up",
    "numbUrban", "pctUrban", "medIncome", "pctWWage", "pctWFarmSelf",
    "pctWInvInc", "pctWSocSec", "pctWPubAsst", "pctWRetire", "medFamInc",
    "perCapInc", "whitePerCap", "blackPerCap", "indianPerCap", "AsianPerCap",
    "OtherPerCap", "HispPerCap", "NumUnderPov", "PctPopUnderPov", "PctLess9thGrade",
    "PctNotHSGrad", "PctBSorMore", "PctUnemployed", "PctEmploy", "PctEmplManu",
    "PctEmplProfServ", "PctOccupManu", "PctOccupMgmtProf", "MalePctDivorce", "MalePctNevMarr",
    "FemalePctDiv", "TotalPctDiv", "PersPerFam", "PctFam2Par", "PctKids2Par",
    "PctYoungKids2Par", "PctTeen2Par", "PctWorkMomYoungKids", "PctWorkMom", "NumIlleg",
    "PctIlleg", "NumImmig", "PctImmigRecent", "PctImmigRec5", "PctImmigRec8",
    "PctImmigRec10", "PctRecentImmig", "PctRecImmig5", "PctRecImmig8", "PctRecImmig10",
    "PctSpeakEnglOnly", "PctNotSpeakEnglWell", "PctLargHouseFam", "PctLargHouseOccup", "PersPerOccupHous",
    "PersPerOwnOccHous", "PersPerRentOccHous", "PctPersOwnOccup", "PctPersDenseHous", "PctHousLess3BR",
    "MedNumBR", "HousVacant", "PctHousOccup", "PctHousOwnOcc", "PctVacantBoarded",
    "PctVacMore6Mos", "MedYrHousBuilt", "PctHousNoPhone", "PctWOFullPlumb", "OwnOccLowQuart",
    "OwnOccMedVal", "OwnOccHiQuart", "RentLowQ", "RentMedian", "RentHighQ",
    "MedRent", "MedRentPctHousInc", "MedOwnCostPctInc", "MedOwnCostPctIncNoMtg", "NumInShelters",
    "NumStreet", "PctForeignBorn", "PctBornSameState", "PctSameHouse85", "PctSameCity85",
    "PctSameState85", "LemasSwornFT", "LemasSwFTPerPop", "LemasSwFTFieldOps", "LemasSwFTFieldPerPop",
    "LemasTotalReq", "LemasTotReqPerPop", "PolicReqPerOffic", "PolicPerPop", "RacialMatchCommPol",
    "PctPolicWhite", "PctPolicBlack", "PctPolicHisp", "PctPolicAsian", "PctPolicMinor",
    "OfficAssgnDrugUnits", "NumKindsDrugsSeiz", "PolicAveOTWorked", "LandArea", "PopDens",
    "PctUsePubTrans", "PolicCars", "PolicOperBudg", "LemasPctPolicOnPatr", "LemasGangUnitDeploy",
    "LemasPctOfficDrugUn", "PolicBudgPerPop", "ViolentCrimesPerPop",
];

const STATE_COLUMN: usize = 0;
const NAME_COLUMN: usize = 3;
const TARGET_COLUMN: usize = 127;

/// Positions of the optional attributes a record keeps
const ATTRIBUTE_COLUMNS: [(Attribute, usize); 10] = [
    (Attribute::Population, 5),
    (Attribute::RacePctBlack, 7),
    (Attribute::RacePctWhite, 8),
    (Attribute::RacePctAsian, 9),
    (Attribute::RacePctHisp, 10),
    (Attribute::PctUrban, 16),
    (Attribute::MedIncome, 17),
    (Attribute::PctPopUnderPov, 33),
    (Attribute::PctBsOrMore, 36),
    (Attribute::PctUnemployed, 37),
];

/// Result of parsing a whole file
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRows {
    pub records: Vec<CommunityRecord>,
    /// Rows dropped because the target value was missing
    pub skipped: usize,
}

/// Parse raw file contents into records
pub fn parse_records(data: &[u8]) -> EngineResult<ParsedRows> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(index as u64 + 1);

        match parse_row(&row, line)? {
            Some(record) => records.push(record),
            None => {
                skipped += 1;
                process_debug!(ProcessId::current(), "Skipping line {} without a crime rate", line);
            }
        }
    }

    Ok(ParsedRows { records, skipped })
}

/// `None` when the target is missing; the row is valid but unusable
fn parse_row(row: &StringRecord, line: u64) -> EngineResult<Option<CommunityRecord>> {
    if row.len() != COLUMNS.len() {
        return Err(EngineError::MalformedRecord {
            line,
            column: "*".to_string(),
            message: format!("expected {} fields, found {}", COLUMNS.len(), row.len()),
        });
    }

    let state_code = match field(row, STATE_COLUMN) {
        Some(raw) => raw
            .parse::<StateCode>()
            .map_err(|e| malformed(line, STATE_COLUMN, format!("'{raw}' is not a region code: {e}")))?,
        None => return Err(malformed(line, STATE_COLUMN, "missing region code".to_string())),
    };

    let Some(crime) = numeric(row, TARGET_COLUMN, line)? else {
        return Ok(None);
    };

    let mut record =
        CommunityRecord::new(state_code, crime).with_name(field(row, NAME_COLUMN).unwrap_or(UNKNOWN_COMMUNITY));
    for (attribute, column) in ATTRIBUTE_COLUMNS {
        if let Some(value) = numeric(row, column, line)? {
            record = record.with_attribute(attribute, value);
        }
    }
    Ok(Some(record))
}

fn field(row: &StringRecord, column: usize) -> Option<&str> {
    row.get(column).filter(|raw| !raw.is_empty() && *raw != MISSING)
}

fn numeric(row: &StringRecord, column: usize, line: u64) -> EngineResult<Option<f64>> {
    let Some(raw) = field(row, column) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(malformed(line, column, format!("'{raw}' is not finite"))),
        Err(e) => Err(malformed(line, column, format!("'{raw}': {e}"))),
    }
}

fn malformed(line: u64, column: usize, message: String) -> EngineError {
    EngineError::MalformedRecord {
        line,
        column: COLUMNS[column].to_string(),
        message,
    }
}

/// Dataset file on local disk
#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    path: PathBuf,
}

impl CsvDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DatasetSource for CsvDatasetSource {
    async fn load(&self) -> EngineResult<Vec<CommunityRecord>> {
        let data = fs::read(&self.path).await.map_err(|source| EngineError::DatasetIo {
            path: self.path.display().to_string(),
            source,
        })?;

        let parsed = parse_records(&data)?;
        if parsed.skipped > 0 {
            process_warn!(
                ProcessId::current(),
                "⚠️  Skipped {} rows without ViolentCrimesPerPop in {}",
                parsed.skipped,
                self.path.display()
            );
        }
        Ok(parsed.records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
