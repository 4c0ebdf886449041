use chrono::NaiveDate;
use serde::Deserialize;

/// Column names of the input CSV, in file order.
pub const COLUMNS: [&str; 12] = [
    "patient_id",
    "admission_date",
    "discharge_date",
    "age",
    "condition",
    "treatment_type",
    "insurance_type",
    "length_of_stay",
    "total_cost",
    "doctor_visits",
    "treatment_success",
    "readmitted",
];

/// One patient admission-to-discharge row exactly as it appears in the
/// input CSV, before any cleaning.
#[derive(Debug, Clone, Deserialize)]
pub struct EncounterRecord {
    /// Patient identifier string.
    pub patient_id: String,
    /// Admission date as the raw string from the file.
    pub admission_date: String,
    /// Discharge date as the raw string from the file.
    pub discharge_date: String,
    /// Patient age in years.
    pub age: u32,
    /// Medical condition category.
    pub condition: String,
    /// Treatment type category.
    pub treatment_type: String,
    /// Insurance type category.
    pub insurance_type: String,
    /// Length of stay in days.
    pub length_of_stay: f64,
    /// Total treatment cost in USD.
    pub total_cost: f64,
    /// Number of doctor visits during the stay.
    pub doctor_visits: f64,
    /// "Yes"/"No" treatment outcome.
    pub treatment_success: String,
    /// "Yes"/"No" readmission flag.
    pub readmitted: String,
}

/// A cleaned encounter with parsed dates and derived columns.
///
/// Produced once per record during the cleaning pass; never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct Encounter {
    pub patient_id: String,
    pub admission_date: NaiveDate,
    pub discharge_date: NaiveDate,
    pub age: u32,
    pub condition: String,
    pub treatment_type: String,
    pub insurance_type: String,
    pub length_of_stay: f64,
    pub total_cost: f64,
    pub doctor_visits: f64,
    /// 1 for "Yes", 0 for "No", `None` for any other value.
    pub success_flag: Option<u8>,
    /// 1 for "Yes", 0 for "No", `None` for any other value.
    pub readmitted_flag: Option<u8>,
    /// Month bucket of the admission date, `"YYYY-MM"`.
    pub admission_month: String,
    /// Fixed age bucket, `None` for ages outside the binned range.
    pub age_group: Option<AgeGroup>,
}

// ── AgeGroup ──────────────────────────────────────────────────────────────────

/// Fixed age bucket with bin edges (0, 35], (35, 50], (50, 65], (65, 100].
///
/// The variant order is the display order of the buckets, youngest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Young,
    Middle,
    Senior,
    Elderly,
}

impl AgeGroup {
    /// All buckets in display order.
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Young,
        AgeGroup::Middle,
        AgeGroup::Senior,
        AgeGroup::Elderly,
    ];

    /// Assign a bucket for an age in years.
    ///
    /// Both bin edges of the outermost buckets are exclusive on the low side
    /// and inclusive on the high side, so ages 0 and 101 get no bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use report_core::models::AgeGroup;
    ///
    /// assert_eq!(AgeGroup::for_age(35), Some(AgeGroup::Young));
    /// assert_eq!(AgeGroup::for_age(36), Some(AgeGroup::Middle));
    /// assert_eq!(AgeGroup::for_age(101), None);
    /// ```
    pub fn for_age(age: u32) -> Option<AgeGroup> {
        match age {
            1..=35 => Some(AgeGroup::Young),
            36..=50 => Some(AgeGroup::Middle),
            51..=65 => Some(AgeGroup::Senior),
            66..=100 => Some(AgeGroup::Elderly),
            _ => None,
        }
    }

    /// Human-readable bucket label, as used in the report and the dashboard
    /// document.
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Young => "Young (18-35)",
            AgeGroup::Middle => "Middle (36-50)",
            AgeGroup::Senior => "Senior (51-65)",
            AgeGroup::Elderly => "Elderly (66+)",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ── Flag mapping ──────────────────────────────────────────────────────────────

/// Map a "Yes"/"No" categorical value to a binary flag.
///
/// The match is exact (case-sensitive): any other value yields `None`, which
/// downstream aggregation treats as a missing observation. This mirrors the
/// consumer contract of the historical dataset, where the two columns only
/// ever hold the two literal strings.
///
/// # Examples
///
/// ```
/// use report_core::models::parse_flag;
///
/// assert_eq!(parse_flag("Yes"), Some(1));
/// assert_eq!(parse_flag("No"), Some(0));
/// assert_eq!(parse_flag("yes"), None);
/// assert_eq!(parse_flag(""), None);
/// ```
pub fn parse_flag(value: &str) -> Option<u8> {
    match value {
        "Yes" => Some(1),
        "No" => Some(0),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── AgeGroup::for_age ─────────────────────────────────────────────────────

    #[test]
    fn test_age_group_lower_edge_excluded() {
        assert_eq!(AgeGroup::for_age(0), None);
        assert_eq!(AgeGroup::for_age(1), Some(AgeGroup::Young));
    }

    #[test]
    fn test_age_group_bucket_boundaries() {
        assert_eq!(AgeGroup::for_age(35), Some(AgeGroup::Young));
        assert_eq!(AgeGroup::for_age(36), Some(AgeGroup::Middle));
        assert_eq!(AgeGroup::for_age(50), Some(AgeGroup::Middle));
        assert_eq!(AgeGroup::for_age(51), Some(AgeGroup::Senior));
        assert_eq!(AgeGroup::for_age(65), Some(AgeGroup::Senior));
        assert_eq!(AgeGroup::for_age(66), Some(AgeGroup::Elderly));
        assert_eq!(AgeGroup::for_age(100), Some(AgeGroup::Elderly));
    }

    #[test]
    fn test_age_group_upper_edge_excluded() {
        assert_eq!(AgeGroup::for_age(101), None);
        assert_eq!(AgeGroup::for_age(130), None);
    }

    #[test]
    fn test_age_group_labels() {
        assert_eq!(AgeGroup::Young.label(), "Young (18-35)");
        assert_eq!(AgeGroup::Middle.label(), "Middle (36-50)");
        assert_eq!(AgeGroup::Senior.label(), "Senior (51-65)");
        assert_eq!(AgeGroup::Elderly.label(), "Elderly (66+)");
    }

    #[test]
    fn test_age_group_ordering_is_display_order() {
        assert!(AgeGroup::Young < AgeGroup::Middle);
        assert!(AgeGroup::Middle < AgeGroup::Senior);
        assert!(AgeGroup::Senior < AgeGroup::Elderly);
    }

    // ── parse_flag ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_flag_yes_no() {
        assert_eq!(parse_flag("Yes"), Some(1));
        assert_eq!(parse_flag("No"), Some(0));
    }

    #[test]
    fn test_parse_flag_unmapped_is_none() {
        assert_eq!(parse_flag("YES"), None);
        assert_eq!(parse_flag("no"), None);
        assert_eq!(parse_flag("Unknown"), None);
        assert_eq!(parse_flag(""), None);
    }

    // ── EncounterRecord deserialization ───────────────────────────────────────

    #[test]
    fn test_encounter_record_from_csv_row() {
        let data = "patient_id,admission_date,discharge_date,age,condition,treatment_type,\
                    insurance_type,length_of_stay,total_cost,doctor_visits,treatment_success,readmitted\n\
                    P001,2024-01-15,2024-01-20,47,Diabetes,Medication,Private,5,12000.50,3,Yes,No\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let record: EncounterRecord = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(record.patient_id, "P001");
        assert_eq!(record.age, 47);
        assert_eq!(record.condition, "Diabetes");
        assert!((record.total_cost - 12000.50).abs() < 1e-9);
        assert_eq!(record.treatment_success, "Yes");
    }
}
