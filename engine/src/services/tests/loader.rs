//! Tests for the CSV dataset source
//!
//! Cover field layout, missing-value handling, skipped rows and the
//! malformed-record errors, both in memory and through real files.

use std::io::Write;

use shared::{Attribute, UNKNOWN_COMMUNITY};
use tempfile::NamedTempFile;

use super::common::{data_line, with_timeout};
use crate::error::EngineError;
use crate::services::loader::{COLUMNS, CsvDatasetSource, parse_records};
use crate::traits::DatasetSource;

fn write_dataset(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn test_column_layout() {
    assert_eq!(COLUMNS.len(), 128);
    assert_eq!(COLUMNS[0], "state");
    assert_eq!(COLUMNS[3], "communityname");
    assert_eq!(COLUMNS[127], "ViolentCrimesPerPop");
    // Every attribute the record keeps is present by name
    for attribute in Attribute::ALL {
        assert!(COLUMNS.contains(&attribute.column_name()), "{attribute} missing");
    }
}

#[test]
fn test_parse_basic_rows() {
    let data = [
        data_line("6", "Alphacity", "0.19", "0.10"),
        data_line("36", "Betatown", "?", "0.50"),
    ]
    .join("\n");

    let parsed = parse_records(data.as_bytes()).unwrap();
    assert_eq!(parsed.skipped, 0);
    assert_eq!(parsed.records.len(), 2);

    let first = &parsed.records[0];
    assert_eq!(first.state_code, 6);
    assert_eq!(first.community_name, "Alphacity");
    assert_eq!(first.population, Some(0.19));
    assert_eq!(first.violent_crimes_per_pop, 0.10);
    assert_eq!(first.med_income, None);

    assert_eq!(parsed.records[1].population, None);
}

#[test]
fn test_attribute_columns_land_in_the_right_fields() {
    let mut fields = vec!["?".to_string(); 128];
    fields[0] = "8".to_string();
    fields[3] = "Gammaville".to_string();
    fields[7] = "0.07".to_string();
    fields[16] = "0.16".to_string();
    fields[17] = "0.17".to_string();
    fields[33] = "0.33".to_string();
    fields[36] = "0.36".to_string();
    fields[37] = "0.37".to_string();
    fields[127] = "0.9".to_string();

    let parsed = parse_records(fields.join(",").as_bytes()).unwrap();
    let record = &parsed.records[0];
    assert_eq!(record.value(Attribute::RacePctBlack), Some(0.07));
    assert_eq!(record.value(Attribute::PctUrban), Some(0.16));
    assert_eq!(record.value(Attribute::MedIncome), Some(0.17));
    assert_eq!(record.value(Attribute::PctPopUnderPov), Some(0.33));
    assert_eq!(record.value(Attribute::PctBsOrMore), Some(0.36));
    assert_eq!(record.value(Attribute::PctUnemployed), Some(0.37));
    assert_eq!(record.value(Attribute::RacePctWhite), None);
}

#[test]
fn test_whitespace_is_trimmed_and_missing_name_defaults() {
    let data = data_line(" 6 ", "?", " 0.5 ", " 0.25 ");
    let parsed = parse_records(data.as_bytes()).unwrap();
    let record = &parsed.records[0];
    assert_eq!(record.state_code, 6);
    assert_eq!(record.community_name, UNKNOWN_COMMUNITY);
    assert_eq!(record.population, Some(0.5));
    assert_eq!(record.violent_crimes_per_pop, 0.25);
}

#[test]
fn test_rows_without_target_are_skipped() {
    let data = [
        data_line("6", "A", "0.1", "0.2"),
        data_line("6", "B", "0.1", "?"),
        data_line("36", "C", "0.1", "0.3"),
    ]
    .join("\n");

    let parsed = parse_records(data.as_bytes()).unwrap();
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.skipped, 1);
    let names: Vec<_> = parsed.records.iter().map(|r| r.community_name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn test_wrong_field_count_is_malformed() {
    let data = format!("{}\n6,Short,0.1", data_line("6", "A", "0.1", "0.2"));
    let err = parse_records(data.as_bytes()).unwrap_err();
    match err {
        EngineError::MalformedRecord { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, "*");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_numeric_attribute_is_malformed() {
    let data = data_line("6", "A", "lots", "0.2");
    let err = parse_records(data.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::MalformedRecord { line: 1, ref column, .. } if column == "population"
    ));
}

#[test]
fn test_bad_state_code_is_malformed() {
    for state in ["?", "6.5", "CA"] {
        let data = data_line(state, "A", "0.1", "0.2");
        let err = parse_records(data.as_bytes()).unwrap_err();
        assert!(
            matches!(err, EngineError::MalformedRecord { ref column, .. } if column == "state"),
            "state '{state}' should be rejected"
        );
    }
}

#[test]
fn test_empty_input() {
    let parsed = parse_records(b"").unwrap();
    assert!(parsed.records.is_empty());
    assert_eq!(parsed.skipped, 0);
}

#[tokio::test]
async fn test_csv_source_reads_file() {
    let file = write_dataset(&[
        data_line("6", "Alphacity", "0.19", "0.10"),
        data_line("6", "Betatown", "0.05", "?"),
        data_line("36", "Gammaville", "0.30", "0.50"),
    ]);

    let source = CsvDatasetSource::new(file.path());
    let records = with_timeout(source.load()).await.unwrap().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].community_name, "Gammaville");
    assert_eq!(source.describe(), file.path().display().to_string());
}

#[tokio::test]
async fn test_csv_source_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = CsvDatasetSource::new(dir.path().join("absent.data"));
    let err = source.load().await.unwrap_err();
    assert!(matches!(err, EngineError::DatasetIo { .. }));
}
