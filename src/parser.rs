// 🏗️ Hut Data Loader - semicolon-delimited records → parsed HutRecords
//
// Input format (header row first):
//   Province;Municipality;MunicipalityAltitude;Name;Altitude;Category;BedsNumber
//
// Fields are trimmed. Text columns and the hut altitude may be empty. Rows
// with the wrong number of fields or a non-numeric required field are skipped
// and logged; the load goes on.

use crate::error::{HutsError, HutsResult};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of columns every data row must have
pub const FIELD_COUNT: usize = 7;

// ============================================================================
// CORE TYPES
// ============================================================================

/// One validated input row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HutRecord {
    pub province: String,
    pub municipality: String,
    pub municipality_altitude: i32,
    pub hut_name: String,
    pub hut_altitude: Option<i32>,
    pub category: String,
    pub beds_number: u32,
}

/// A row that was rejected during loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line in the source, counting the header
    pub line_number: usize,
    pub reason: String,
}

/// Outcome of a load: how many rows were seen, kept and skipped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Read {} rows, loaded {}, skipped {}",
            self.rows_read,
            self.rows_loaded,
            self.skipped_count()
        )
    }
}

// ============================================================================
// FIELD PARSING
// ============================================================================

fn required<'r>(record: &'r StringRecord, index: usize, field: &'static str) -> HutsResult<&'r str> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(HutsError::MissingField(field)),
    }
}

fn number<T: std::str::FromStr>(value: &str, field: &'static str) -> HutsResult<T> {
    value.parse().map_err(|_| HutsError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// Parse a single (already trimmed) row into a `HutRecord`
pub fn parse_record(record: &StringRecord) -> HutsResult<HutRecord> {
    if record.len() != FIELD_COUNT {
        return Err(HutsError::InvalidField {
            field: "row",
            value: format!("{} fields, expected {}", record.len(), FIELD_COUNT),
        });
    }

    let text = |index: usize| record.get(index).unwrap_or("");

    let province = text(0);
    let municipality = text(1);
    let municipality_altitude = number(required(record, 2, "municipality altitude")?, "municipality altitude")?;
    let hut_name = text(3);

    let hut_altitude = match text(4) {
        "" => None,
        value => Some(number(value, "hut altitude")?),
    };

    let category = text(5);
    let beds_number = number(required(record, 6, "beds number")?, "beds number")?;

    Ok(HutRecord {
        province: province.to_string(),
        municipality: municipality.to_string(),
        municipality_altitude,
        hut_name: hut_name.to_string(),
        hut_altitude,
        category: category.to_string(),
        beds_number,
    })
}

// ============================================================================
// READERS
// ============================================================================

/// Read every row from `reader`, skipping (and logging) malformed ones
pub fn read_records<R: Read>(reader: R) -> Result<(Vec<HutRecord>, LoadReport)> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    for (row_num, result) in csv_reader.records().enumerate() {
        report.rows_read += 1;
        // +2 because: 1-indexed + header row
        let fallback_line = row_num + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                // Bad UTF-8 and the like: skip the row, an I/O error stops the load
                if e.is_io_error() {
                    return Err(e).context("Failed to read hut data");
                }
                skip(&mut report, fallback_line, e.to_string());
                continue;
            }
        };

        let line_number = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        match parse_record(&record) {
            Ok(parsed) => {
                records.push(parsed);
                report.rows_loaded += 1;
            }
            Err(e) => skip(&mut report, line_number, e.to_string()),
        }
    }

    Ok((records, report))
}

fn skip(report: &mut LoadReport, line_number: usize, reason: String) {
    tracing::warn!(line = line_number, %reason, "skipping malformed row");
    report.skipped.push(SkippedRow { line_number, reason });
}

/// Open `path` and read its rows
pub fn read_file(path: &Path) -> Result<(Vec<HutRecord>, LoadReport)> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    read_records(file).with_context(|| format!("Failed to load {}", path.display()))
}

// ============================================================================
// TESTS
// ============================================================================
