//! Group-wise aggregation over cleaned encounters.
//!
//! Groups accumulate in `BTreeMap`s, so every grouped table comes out sorted
//! by key. That ordering is also the documented tie-break for the extremum
//! findings: a linear scan with strict comparisons keeps the first (smallest)
//! key on ties.

use std::collections::BTreeMap;

use report_core::formatting::percentage;
use report_core::models::Encounter;
use report_core::stats::round_to;

// ── GroupAccumulator ──────────────────────────────────────────────────────────

/// Running sums for one group of encounters.
#[derive(Debug, Clone, Default)]
struct GroupAccumulator {
    patient_count: u32,
    stay_sum: f64,
    cost_sum: f64,
    success_sum: u32,
    success_n: u32,
    readmit_sum: u32,
    readmit_n: u32,
}

impl GroupAccumulator {
    /// Add a single encounter to the running totals.
    ///
    /// Missing flags are skipped entirely: they contribute to neither the
    /// numerator nor the denominator of the group rates.
    fn add(&mut self, encounter: &Encounter) {
        self.patient_count += 1;
        self.stay_sum += encounter.length_of_stay;
        self.cost_sum += encounter.total_cost;
        if let Some(flag) = encounter.success_flag {
            self.success_sum += u32::from(flag);
            self.success_n += 1;
        }
        if let Some(flag) = encounter.readmitted_flag {
            self.readmit_sum += u32::from(flag);
            self.readmit_n += 1;
        }
    }

    /// Finish the group into display-ready, rounded statistics.
    fn finish(&self, key: String) -> GroupStats {
        GroupStats {
            key,
            patient_count: self.patient_count,
            avg_stay: round_to(self.stay_sum / f64::from(self.patient_count), 2),
            avg_cost: round_to(self.cost_sum / f64::from(self.patient_count), 2),
            success_rate: Self::rate(self.success_sum, self.success_n),
            readmission_rate: Self::rate(self.readmit_sum, self.readmit_n),
        }
    }

    /// Percentage rate from a mapped-flag mean.
    ///
    /// The mean is rounded to 2 decimals before scaling to a percentage and
    /// rounding again to 1 decimal; downstream consumers rely on this exact
    /// two-step rounding.
    fn rate(sum: u32, n: u32) -> f64 {
        if n == 0 {
            return 0.0;
        }
        let mean = round_to(f64::from(sum) / f64::from(n), 2);
        round_to(mean * 100.0, 1)
    }
}

// ── GroupStats ────────────────────────────────────────────────────────────────

/// Rounded, display-ready statistics for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    /// The grouping key, e.g. a condition name or an age-bucket label.
    pub key: String,
    pub patient_count: u32,
    /// Mean length of stay in days, 2 decimals.
    pub avg_stay: f64,
    /// Mean total cost in USD, 2 decimals.
    pub avg_cost: f64,
    /// Success percentage over the mapped flags, 1 decimal.
    pub success_rate: f64,
    /// Readmission percentage over the mapped flags, 1 decimal.
    pub readmission_rate: f64,
}

/// One row of the monthly admissions trend.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrend {
    /// Month bucket, `"YYYY-MM"`.
    pub month: String,
    pub admissions: u32,
    /// Mean total cost for the month, 2 decimals.
    pub avg_cost: f64,
}

// ── Overall KPIs ──────────────────────────────────────────────────────────────

/// Dataset-wide key performance indicators.
///
/// Unlike the grouped rates, the overall rates keep the full patient count
/// as denominator: an unmapped flag counts as a failure/non-readmission.
/// The two conventions come from the consumer contract and intentionally
/// disagree when unmapped values exist.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallKpis {
    pub total_patients: usize,
    /// Mean length of stay in days, unrounded.
    pub avg_stay: f64,
    /// Mean total cost in USD, unrounded.
    pub avg_cost: f64,
    /// Success percentage of all patients, 1 decimal.
    pub success_rate: f64,
    /// Readmission percentage of all patients, 1 decimal.
    pub readmission_rate: f64,
}

/// Compute the dataset-wide KPIs.
pub fn overall_kpis(encounters: &[Encounter]) -> OverallKpis {
    let total = encounters.len();
    let stay_sum: f64 = encounters.iter().map(|e| e.length_of_stay).sum();
    let cost_sum: f64 = encounters.iter().map(|e| e.total_cost).sum();
    let success_sum: u32 = encounters
        .iter()
        .filter_map(|e| e.success_flag)
        .map(u32::from)
        .sum();
    let readmit_sum: u32 = encounters
        .iter()
        .filter_map(|e| e.readmitted_flag)
        .map(u32::from)
        .sum();

    OverallKpis {
        total_patients: total,
        avg_stay: if total == 0 { 0.0 } else { stay_sum / total as f64 },
        avg_cost: if total == 0 { 0.0 } else { cost_sum / total as f64 },
        success_rate: percentage(f64::from(success_sum), total as f64, 1),
        readmission_rate: percentage(f64::from(readmit_sum), total as f64, 1),
    }
}

// ── Grouped tables ────────────────────────────────────────────────────────────

/// Generic aggregation driver.
///
/// `key_fn` maps an encounter to its group key; `None` drops the encounter
/// from this particular grouping (used for unbucketed ages). Results come
/// back sorted by key.
fn aggregate_by_key<K, F>(encounters: &[Encounter], key_fn: F) -> Vec<GroupStats>
where
    K: Ord + ToString,
    F: Fn(&Encounter) -> Option<K>,
{
    let mut map: BTreeMap<K, GroupAccumulator> = BTreeMap::new();

    for encounter in encounters {
        if let Some(key) = key_fn(encounter) {
            map.entry(key).or_default().add(encounter);
        }
    }

    map.into_iter()
        .map(|(key, acc)| acc.finish(key.to_string()))
        .collect()
}

/// Group by medical condition, sorted by condition name.
pub fn by_condition(encounters: &[Encounter]) -> Vec<GroupStats> {
    aggregate_by_key(encounters, |e| Some(e.condition.clone()))
}

/// Group by treatment type, sorted by treatment name.
pub fn by_treatment(encounters: &[Encounter]) -> Vec<GroupStats> {
    aggregate_by_key(encounters, |e| Some(e.treatment_type.clone()))
}

/// Group by age bucket, youngest bucket first. Encounters whose age falls
/// outside the binned range are excluded.
pub fn by_age_group(encounters: &[Encounter]) -> Vec<GroupStats> {
    aggregate_by_key(encounters, |e| e.age_group)
}

/// Group by insurance type, sorted by name.
pub fn by_insurance(encounters: &[Encounter]) -> Vec<GroupStats> {
    aggregate_by_key(encounters, |e| Some(e.insurance_type.clone()))
}

/// Admissions and average cost per admission month, chronological.
pub fn monthly_trends(encounters: &[Encounter]) -> Vec<MonthlyTrend> {
    aggregate_by_key(encounters, |e| Some(e.admission_month.clone()))
        .into_iter()
        .map(|g| MonthlyTrend {
            month: g.key,
            admissions: g.patient_count,
            avg_cost: g.avg_cost,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
