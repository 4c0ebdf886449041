//! Derived findings over the aggregated tables and the raw encounters.
//!
//! Extremum extraction runs over the by-condition table; because that table
//! is sorted by key, the strict comparisons below resolve ties to the
//! lexicographically smallest condition name.

use std::collections::HashMap;

use report_core::models::Encounter;
use report_core::stats::{mean_or_zero, median, pearson};

use crate::aggregator::GroupStats;

// ── Condition findings ────────────────────────────────────────────────────────

/// Best / worst / most-expensive groups from the by-condition table.
///
/// Each entry is `(condition name, metric value)`; all are `None` only when
/// the table itself is empty.
#[derive(Debug, Clone, Default)]
pub struct ConditionFindings {
    pub best_success: Option<(String, f64)>,
    pub worst_success: Option<(String, f64)>,
    pub most_expensive: Option<(String, f64)>,
}

/// Scan the by-condition table for the extremum groups.
pub fn condition_findings(by_condition: &[GroupStats]) -> ConditionFindings {
    let mut findings = ConditionFindings::default();

    for group in by_condition {
        let beats_best = findings
            .best_success
            .as_ref()
            .map_or(true, |(_, rate)| group.success_rate > *rate);
        if beats_best {
            findings.best_success = Some((group.key.clone(), group.success_rate));
        }

        let beats_worst = findings
            .worst_success
            .as_ref()
            .map_or(true, |(_, rate)| group.success_rate < *rate);
        if beats_worst {
            findings.worst_success = Some((group.key.clone(), group.success_rate));
        }

        let beats_cost = findings
            .most_expensive
            .as_ref()
            .map_or(true, |(_, cost)| group.avg_cost > *cost);
        if beats_cost {
            findings.most_expensive = Some((group.key.clone(), group.avg_cost));
        }
    }

    findings
}

// ── Expensive long-stay subset ────────────────────────────────────────────────

/// Encounters whose cost AND stay both strictly exceed the dataset medians.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensiveLongStay {
    pub patient_count: usize,
    /// Mean cost of the subset, `0.0` when the subset is empty.
    pub avg_cost: f64,
    /// Mean stay of the subset, `0.0` when the subset is empty.
    pub avg_stay: f64,
    /// Up to three most frequent conditions in the subset, count descending,
    /// name ascending on equal counts.
    pub top_conditions: Vec<(String, usize)>,
}

/// Find the high-cost, long-stay encounters.
pub fn expensive_long_stay(encounters: &[Encounter]) -> ExpensiveLongStay {
    let costs: Vec<f64> = encounters.iter().map(|e| e.total_cost).collect();
    let stays: Vec<f64> = encounters.iter().map(|e| e.length_of_stay).collect();

    let cost_median = median(&costs).unwrap_or(0.0);
    let stay_median = median(&stays).unwrap_or(0.0);

    let subset: Vec<&Encounter> = encounters
        .iter()
        .filter(|e| e.total_cost > cost_median && e.length_of_stay > stay_median)
        .collect();

    let subset_costs: Vec<f64> = subset.iter().map(|e| e.total_cost).collect();
    let subset_stays: Vec<f64> = subset.iter().map(|e| e.length_of_stay).collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for encounter in &subset {
        *counts.entry(encounter.condition.as_str()).or_default() += 1;
    }
    let mut top_conditions: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    top_conditions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_conditions.truncate(3);

    ExpensiveLongStay {
        patient_count: subset.len(),
        avg_cost: mean_or_zero(&subset_costs),
        avg_stay: mean_or_zero(&subset_stays),
        top_conditions,
    }
}

// ── Correlation matrix ────────────────────────────────────────────────────────

/// Names of the numeric fields in the correlation matrix, in matrix order.
pub const CORRELATION_FIELDS: [&str; 5] = [
    "age",
    "length_of_stay",
    "total_cost",
    "doctor_visits",
    "success_flag",
];

/// Pairwise Pearson correlations over the five numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// `values[i][j]` is the correlation between field `i` and field `j`.
    pub values: [[f64; 5]; 5],
}

impl CorrelationMatrix {
    /// Look up a correlation by field names. Unknown names yield `0.0`.
    pub fn get(&self, a: &str, b: &str) -> f64 {
        let index = |name: &str| CORRELATION_FIELDS.iter().position(|f| *f == name);
        match (index(a), index(b)) {
            (Some(i), Some(j)) => self.values[i][j],
            _ => 0.0,
        }
    }
}

/// Compute the correlation matrix.
///
/// The success flag column has gaps where the source value was unmapped;
/// any pair with a missing side is dropped from that pair's series
/// (pairwise deletion).
pub fn correlation_matrix(encounters: &[Encounter]) -> CorrelationMatrix {
    let columns: [Vec<Option<f64>>; 5] = [
        encounters.iter().map(|e| Some(f64::from(e.age))).collect(),
        encounters.iter().map(|e| Some(e.length_of_stay)).collect(),
        encounters.iter().map(|e| Some(e.total_cost)).collect(),
        encounters.iter().map(|e| Some(e.doctor_visits)).collect(),
        encounters
            .iter()
            .map(|e| e.success_flag.map(f64::from))
            .collect(),
    ];

    let mut values = [[0.0_f64; 5]; 5];
    for i in 0..5 {
        for j in 0..5 {
            values[i][j] = pairwise_pearson(&columns[i], &columns[j]);
        }
    }

    CorrelationMatrix { values }
}

/// Age ↔ total-cost correlation, reported standalone in the age section.
pub fn age_cost_correlation(encounters: &[Encounter]) -> f64 {
    let ages: Vec<f64> = encounters.iter().map(|e| f64::from(e.age)).collect();
    let costs: Vec<f64> = encounters.iter().map(|e| e.total_cost).collect();
    pearson(&ages, &costs)
}

/// Pearson over the positions where both columns have a value.
fn pairwise_pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let mut paired_x = Vec::with_capacity(xs.len());
    let mut paired_y = Vec::with_capacity(ys.len());
    for (x, y) in xs.iter().zip(ys) {
        if let (Some(x), Some(y)) = (x, y) {
            paired_x.push(*x);
            paired_y.push(*y);
        }
    }
    pearson(&paired_x, &paired_y)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
