//! CSV ingestion for the encounter report.
//!
//! Reads the whole dataset into memory as typed [`EncounterRecord`]s and
//! computes the dataset overview shown at the top of the report.

use std::path::Path;

use report_core::error::{ReportError, Result};
use report_core::models::{EncounterRecord, COLUMNS};
use report_core::stats::{describe, DescriptiveStats};
use tracing::debug;

// ── DatasetOverview ───────────────────────────────────────────────────────────

/// Facts about the raw dataset, printed before any cleaning happens.
#[derive(Debug, Clone)]
pub struct DatasetOverview {
    /// Number of data rows in the file.
    pub row_count: usize,
    /// Smallest admission date string in the file.
    pub first_admission: Option<String>,
    /// Largest discharge date string in the file.
    pub last_discharge: Option<String>,
    /// Column names, in file order.
    pub columns: Vec<String>,
    /// Eight-number summaries for the numeric columns, in column order.
    pub numeric_summaries: Vec<(String, DescriptiveStats)>,
    /// Per-column count of missing (empty) values.
    pub missing_counts: Vec<(String, usize)>,
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load the encounter CSV at `path` into memory.
///
/// The column set is fixed (see [`COLUMNS`]); a missing column or a
/// non-numeric value in a numeric field surfaces as a [`ReportError::CsvParse`]
/// and aborts the run. A file with a header but no rows is an
/// [`ReportError::EmptyDataset`].
pub fn load_encounters(path: &Path) -> Result<Vec<EncounterRecord>> {
    let file = std::fs::File::open(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records: Vec<EncounterRecord> = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    if records.is_empty() {
        return Err(ReportError::EmptyDataset(path.to_path_buf()));
    }

    debug!("Loaded {} encounter rows from {}", records.len(), path.display());
    Ok(records)
}

/// Compute the [`DatasetOverview`] for the loaded rows.
pub fn dataset_overview(records: &[EncounterRecord]) -> DatasetOverview {
    let first_admission = records
        .iter()
        .map(|r| r.admission_date.as_str())
        .min()
        .map(str::to_string);
    let last_discharge = records
        .iter()
        .map(|r| r.discharge_date.as_str())
        .max()
        .map(str::to_string);

    // Numeric columns in file order. Age is widened to f64 for the summary.
    let numeric_columns: [(&str, Vec<f64>); 4] = [
        ("age", records.iter().map(|r| f64::from(r.age)).collect()),
        (
            "length_of_stay",
            records.iter().map(|r| r.length_of_stay).collect(),
        ),
        ("total_cost", records.iter().map(|r| r.total_cost).collect()),
        (
            "doctor_visits",
            records.iter().map(|r| r.doctor_visits).collect(),
        ),
    ];

    let numeric_summaries = numeric_columns
        .iter()
        .filter_map(|(name, values)| describe(values).map(|s| (name.to_string(), s)))
        .collect();

    DatasetOverview {
        row_count: records.len(),
        first_admission,
        last_discharge,
        columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
        numeric_summaries,
        missing_counts: missing_counts(records),
    }
}

/// Count missing values per column.
///
/// With the typed record schema the numeric columns cannot hold a missing
/// value (the load would have failed), so only the string columns can come
/// up empty.
fn missing_counts(records: &[EncounterRecord]) -> Vec<(String, usize)> {
    let count_empty = |select: fn(&EncounterRecord) -> &str| -> usize {
        records.iter().filter(|r| select(r).is_empty()).count()
    };

    vec![
        ("patient_id".to_string(), count_empty(|r| &r.patient_id)),
        (
            "admission_date".to_string(),
            count_empty(|r| &r.admission_date),
        ),
        (
            "discharge_date".to_string(),
            count_empty(|r| &r.discharge_date),
        ),
        ("age".to_string(), 0),
        ("condition".to_string(), count_empty(|r| &r.condition)),
        (
            "treatment_type".to_string(),
            count_empty(|r| &r.treatment_type),
        ),
        (
            "insurance_type".to_string(),
            count_empty(|r| &r.insurance_type),
        ),
        ("length_of_stay".to_string(), 0),
        ("total_cost".to_string(), 0),
        ("doctor_visits".to_string(), 0),
        (
            "treatment_success".to_string(),
            count_empty(|r| &r.treatment_success),
        ),
        ("readmitted".to_string(), count_empty(|r| &r.readmitted)),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
