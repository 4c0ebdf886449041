//! Cleaning pass: date parsing and derived-column computation.
//!
//! Runs exactly once over the loaded rows and produces [`Encounter`]s with
//! parsed dates, the admission month bucket, binary outcome flags and the
//! age bucket.

use chrono::{NaiveDate, NaiveDateTime};
use report_core::error::{ReportError, Result};
use report_core::models::{parse_flag, AgeGroup, Encounter, EncounterRecord};
use tracing::warn;

/// Date-only formats tried first, then datetime formats whose time part is
/// discarded. First match wins.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a date string against the accepted formats.
///
/// Returns [`ReportError::DateParse`] when nothing matches; per the error
/// model, an unparseable date aborts the whole run.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }
    Err(ReportError::DateParse(value.to_string()))
}

/// Clean every record, deriving the month bucket, binary flags and age
/// bucket.
///
/// Unmapped "Yes"/"No" values become missing flags without failing the run;
/// a warning is logged so the gap is visible in the logs.
pub fn clean_encounters(records: &[EncounterRecord]) -> Result<Vec<Encounter>> {
    records.iter().map(clean_record).collect()
}

fn clean_record(record: &EncounterRecord) -> Result<Encounter> {
    let admission_date = parse_date(&record.admission_date)?;
    let discharge_date = parse_date(&record.discharge_date)?;

    let success_flag = parse_flag(&record.treatment_success);
    if success_flag.is_none() {
        warn!(
            "Unmapped treatment_success value \"{}\" for patient {}; treated as missing",
            record.treatment_success, record.patient_id
        );
    }
    let readmitted_flag = parse_flag(&record.readmitted);
    if readmitted_flag.is_none() {
        warn!(
            "Unmapped readmitted value \"{}\" for patient {}; treated as missing",
            record.readmitted, record.patient_id
        );
    }

    Ok(Encounter {
        patient_id: record.patient_id.clone(),
        admission_date,
        discharge_date,
        age: record.age,
        condition: record.condition.clone(),
        treatment_type: record.treatment_type.clone(),
        insurance_type: record.insurance_type.clone(),
        length_of_stay: record.length_of_stay,
        total_cost: record.total_cost,
        doctor_visits: record.doctor_visits,
        success_flag,
        readmitted_flag,
        admission_month: admission_date.format("%Y-%m").to_string(),
        age_group: AgeGroup::for_age(record.age),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
