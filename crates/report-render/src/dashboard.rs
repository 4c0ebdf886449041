//! The dashboard JSON document.
//!
//! Downstream display matches these field names exactly; the serde renames
//! are the contract, there is no schema versioning.

use std::path::Path;

use report_core::error::{ReportError, Result};
use report_core::stats::round_to;
use serde::{Deserialize, Serialize};

use report_data::aggregator::GroupStats;
use report_data::analysis::AnalysisResult;

// ── Document types ────────────────────────────────────────────────────────────

/// Dataset-wide summary scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryScalars {
    pub total_patients: u64,
    /// Mean length of stay, 1 decimal.
    pub avg_stay: f64,
    /// Mean total cost, 2 decimals.
    pub avg_cost: f64,
    /// Success percentage, 1 decimal.
    pub success_rate: f64,
    /// Readmission percentage, 1 decimal.
    pub readmission_rate: f64,
}

/// One row of the by-condition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRow {
    pub condition: String,
    #[serde(rename = "Patient_Count")]
    pub patient_count: u32,
    #[serde(rename = "Avg_Stay_Days")]
    pub avg_stay_days: f64,
    #[serde(rename = "Avg_Cost")]
    pub avg_cost: f64,
    #[serde(rename = "Success_Rate")]
    pub success_rate: f64,
    #[serde(rename = "Readmission_Rate")]
    pub readmission_rate: f64,
}

/// One row of the by-treatment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRow {
    pub treatment_type: String,
    #[serde(rename = "Patient_Count")]
    pub patient_count: u32,
    #[serde(rename = "Avg_Cost")]
    pub avg_cost: f64,
    #[serde(rename = "Success_Rate")]
    pub success_rate: f64,
    #[serde(rename = "Avg_Stay")]
    pub avg_stay: f64,
}

/// One row of the by-age-group table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeGroupRow {
    pub age_group: String,
    #[serde(rename = "Patient_Count")]
    pub patient_count: u32,
    #[serde(rename = "Avg_Cost")]
    pub avg_cost: f64,
    #[serde(rename = "Avg_Stay")]
    pub avg_stay: f64,
    #[serde(rename = "Success_Rate")]
    pub success_rate: f64,
}

/// One row of the monthly trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub month: String,
    pub admissions: u64,
    /// Mean cost for the month, 2 decimals.
    pub avg_cost: f64,
}

/// The whole document written to the results file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: SummaryScalars,
    pub by_condition: Vec<ConditionRow>,
    pub by_treatment: Vec<TreatmentRow>,
    pub by_age_group: Vec<AgeGroupRow>,
    pub monthly_trends: Vec<MonthlyRow>,
}

// ── Construction ──────────────────────────────────────────────────────────────

impl DashboardData {
    /// Build the document from a finished analysis.
    pub fn from_analysis(result: &AnalysisResult) -> Self {
        DashboardData {
            summary: SummaryScalars {
                total_patients: result.kpis.total_patients as u64,
                avg_stay: round_to(result.kpis.avg_stay, 1),
                avg_cost: round_to(result.kpis.avg_cost, 2),
                success_rate: round_to(result.kpis.success_rate, 1),
                readmission_rate: round_to(result.kpis.readmission_rate, 1),
            },
            by_condition: result.by_condition.iter().map(condition_row).collect(),
            by_treatment: result.by_treatment.iter().map(treatment_row).collect(),
            by_age_group: result.by_age_group.iter().map(age_group_row).collect(),
            monthly_trends: result
                .monthly
                .iter()
                .map(|m| MonthlyRow {
                    month: m.month.clone(),
                    admissions: u64::from(m.admissions),
                    avg_cost: round_to(m.avg_cost, 2),
                })
                .collect(),
        }
    }
}

fn condition_row(group: &GroupStats) -> ConditionRow {
    ConditionRow {
        condition: group.key.clone(),
        patient_count: group.patient_count,
        avg_stay_days: group.avg_stay,
        avg_cost: group.avg_cost,
        success_rate: group.success_rate,
        readmission_rate: group.readmission_rate,
    }
}

fn treatment_row(group: &GroupStats) -> TreatmentRow {
    TreatmentRow {
        treatment_type: group.key.clone(),
        patient_count: group.patient_count,
        avg_cost: group.avg_cost,
        success_rate: group.success_rate,
        avg_stay: group.avg_stay,
    }
}

fn age_group_row(group: &GroupStats) -> AgeGroupRow {
    AgeGroupRow {
        age_group: group.key.clone(),
        patient_count: group.patient_count,
        avg_cost: group.avg_cost,
        avg_stay: group.avg_stay,
        success_rate: group.success_rate,
    }
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// Serialize the document as 2-space-indented JSON and write it to `path`.
pub fn write_dashboard(data: &DashboardData, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json).map_err(|source| ReportError::FileWrite {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Read a previously written document back.
pub fn read_dashboard(path: &Path) -> Result<DashboardData> {
    let content = std::fs::read_to_string(path).map_err(|source| ReportError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
