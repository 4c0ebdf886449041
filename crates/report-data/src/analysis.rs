//! Top-level analysis pipeline for the encounter report.
//!
//! Orchestrates loading, cleaning, aggregation and finding extraction,
//! returning an [`AnalysisResult`] ready for the render layer.

use std::path::Path;

use chrono::Utc;
use report_core::error::Result;
use report_core::models::Encounter;
use tracing::debug;

use crate::aggregator::{self, GroupStats, MonthlyTrend, OverallKpis};
use crate::cleaner::clean_encounters;
use crate::insights::{
    self, ConditionFindings, CorrelationMatrix, ExpensiveLongStay,
};
use crate::reader::{dataset_overview, load_encounters, DatasetOverview};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of encounter rows loaded.
    pub rows_loaded: usize,
    /// Wall-clock seconds spent loading and cleaning the CSV.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent aggregating and extracting findings.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_encounters`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Facts about the raw dataset.
    pub overview: DatasetOverview,
    /// The cleaned encounters, in file order.
    pub encounters: Vec<Encounter>,
    /// Dataset-wide KPIs.
    pub kpis: OverallKpis,
    pub by_condition: Vec<GroupStats>,
    pub by_treatment: Vec<GroupStats>,
    pub by_age_group: Vec<GroupStats>,
    pub by_insurance: Vec<GroupStats>,
    pub monthly: Vec<MonthlyTrend>,
    /// Best / worst / most-expensive condition findings.
    pub findings: ConditionFindings,
    /// High-cost, long-stay subset.
    pub expensive_long_stay: ExpensiveLongStay,
    /// Pairwise correlations over the numeric fields.
    pub correlations: CorrelationMatrix,
    /// Standalone age ↔ cost correlation for the age section.
    pub age_cost_correlation: f64,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline over the CSV at `path`.
///
/// 1. Load the rows and compute the dataset overview.
/// 2. Clean: parse dates, derive month bucket, flags and age bucket.
/// 3. Aggregate the five grouped tables and the overall KPIs.
/// 4. Extract findings and correlations.
///
/// Any malformed row or missing column aborts with an error; there are no
/// partial results.
pub fn analyze_encounters(path: &Path) -> Result<AnalysisResult> {
    // ── Step 1: Load ──────────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let records = load_encounters(path)?;
    let overview = dataset_overview(&records);

    // ── Step 2: Clean ─────────────────────────────────────────────────────────
    let encounters = clean_encounters(&records)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let kpis = aggregator::overall_kpis(&encounters);
    let by_condition = aggregator::by_condition(&encounters);
    let by_treatment = aggregator::by_treatment(&encounters);
    let by_age_group = aggregator::by_age_group(&encounters);
    let by_insurance = aggregator::by_insurance(&encounters);
    let monthly = aggregator::monthly_trends(&encounters);

    // ── Step 4: Findings ──────────────────────────────────────────────────────
    let findings = insights::condition_findings(&by_condition);
    let expensive_long_stay = insights::expensive_long_stay(&encounters);
    let correlations = insights::correlation_matrix(&encounters);
    let age_cost_correlation = insights::age_cost_correlation(&encounters);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    debug!(
        "Analyzed {} encounters across {} conditions",
        encounters.len(),
        by_condition.len()
    );

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        rows_loaded: encounters.len(),
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(AnalysisResult {
        overview,
        encounters,
        kpis,
        by_condition,
        by_treatment,
        by_age_group,
        by_insurance,
        monthly,
        findings,
        expensive_long_stay,
        correlations,
        age_cost_correlation,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
