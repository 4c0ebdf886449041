//! Console report sections.
//!
//! Each section renders into a `String`; [`render_report`] concatenates them
//! in the order the report is read. All numbers go through the shared
//! formatting helpers so the console and the dashboard agree on rounding.

use report_core::formatting::{format_currency, format_number};
use report_data::aggregator::{GroupStats, MonthlyTrend, OverallKpis};
use report_data::analysis::AnalysisResult;
use report_data::insights::{
    ConditionFindings, CorrelationMatrix, ExpensiveLongStay, CORRELATION_FIELDS,
};
use report_data::reader::DatasetOverview;

const RULE: &str = "============================================================";

/// A section heading between two horizontal rules.
fn heading(title: &str) -> String {
    format!("{RULE}\n{title}\n{RULE}\n")
}

/// Fixed-width plain-text table. The first column is left-aligned, all
/// remaining columns right-aligned.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let columns = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    let render_row = |cells: &[String], out: &mut String| {
        for (i, cell) in cells.iter().enumerate().take(columns) {
            if i > 0 {
                out.push_str("  ");
            }
            if i == 0 {
                out.push_str(&format!("{:<width$}", cell, width = widths[i]));
            } else {
                out.push_str(&format!("{:>width$}", cell, width = widths[i]));
            }
        }
        out.push('\n');
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    render_row(&header_cells, &mut out);

    let total_width: usize = widths.iter().sum::<usize>() + 2 * (columns - 1);
    out.push_str(&"-".repeat(total_width));
    out.push('\n');

    for row in rows {
        render_row(row, &mut out);
    }
    out
}

// ── Sections ──────────────────────────────────────────────────────────────────

/// Report banner.
pub fn banner() -> String {
    heading("PATIENT ENCOUNTER ANALYSIS")
}

/// Dataset overview: row count, date range, column list.
pub fn overview_section(overview: &DatasetOverview) -> String {
    let mut out = String::new();
    out.push_str("\nDataset Overview:\n");
    out.push_str(&format!("Total Patients: {}\n", overview.row_count));
    if let (Some(first), Some(last)) = (&overview.first_admission, &overview.last_discharge) {
        out.push_str(&format!("Date Range: {} to {}\n", first, last));
    }
    out.push_str(&format!("\nColumns: {}\n", overview.columns.join(", ")));
    out
}

/// Descriptive statistics for the numeric columns.
pub fn statistics_section(overview: &DatasetOverview) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("BASIC STATISTICS"));

    let mut headers = vec![""];
    headers.extend(overview.numeric_summaries.iter().map(|(name, _)| name.as_str()));

    let stat_rows: [(&str, fn(&report_core::stats::DescriptiveStats) -> String); 8] = [
        ("count", |s| s.count.to_string()),
        ("mean", |s| format_number(s.mean, 2)),
        ("std", |s| format_number(s.std, 2)),
        ("min", |s| format_number(s.min, 2)),
        ("25%", |s| format_number(s.q25, 2)),
        ("50%", |s| format_number(s.median, 2)),
        ("75%", |s| format_number(s.q75, 2)),
        ("max", |s| format_number(s.max, 2)),
    ];

    let rows: Vec<Vec<String>> = stat_rows
        .iter()
        .map(|(label, extract)| {
            let mut row = vec![label.to_string()];
            row.extend(
                overview
                    .numeric_summaries
                    .iter()
                    .map(|(_, stats)| extract(stats)),
            );
            row
        })
        .collect();

    out.push_str(&render_table(&headers, &rows));
    out
}

/// Missing-value counts per column.
pub fn missing_section(overview: &DatasetOverview) -> String {
    let mut out = String::new();
    out.push_str("\nMissing Values:\n");
    for (column, count) in &overview.missing_counts {
        out.push_str(&format!("{:<20} {}\n", column, count));
    }
    out
}

/// Confirmation of the cleaning pass.
pub fn cleaning_section() -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("DATA CLEANING"));
    out.push_str("Data cleaned and prepared\n");
    out.push_str("Date columns converted to calendar dates\n");
    out.push_str("Added binary outcome columns for statistical analysis\n");
    out
}

/// Dataset-wide key performance indicators.
pub fn kpi_section(kpis: &OverallKpis) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("KEY PERFORMANCE INDICATORS"));
    out.push_str("\nHospital Performance:\n");
    out.push_str(&format!(
        "   - Total Patients Treated: {}\n",
        kpis.total_patients
    ));
    out.push_str(&format!(
        "   - Average Length of Stay: {:.1} days\n",
        kpis.avg_stay
    ));
    out.push_str(&format!(
        "   - Average Treatment Cost: {}\n",
        format_currency(kpis.avg_cost)
    ));
    out.push_str(&format!(
        "   - Treatment Success Rate: {:.1}%\n",
        kpis.success_rate
    ));
    out.push_str(&format!(
        "   - Readmission Rate: {:.1}%\n",
        kpis.readmission_rate
    ));
    out
}

/// Grouped table over conditions, plus the extremum findings.
pub fn condition_section(by_condition: &[GroupStats], findings: &ConditionFindings) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("ANALYSIS BY MEDICAL CONDITION"));

    let rows: Vec<Vec<String>> = by_condition
        .iter()
        .map(|g| {
            vec![
                g.key.clone(),
                g.patient_count.to_string(),
                format_number(g.avg_stay, 2),
                format_currency(g.avg_cost),
                format!("{:.1}%", g.success_rate),
                format!("{:.1}%", g.readmission_rate),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["Condition", "Patients", "Avg Stay", "Avg Cost", "Success", "Readmit"],
        &rows,
    ));

    out.push_str("\nKey Findings:\n");
    if let Some((name, rate)) = &findings.best_success {
        out.push_str(&format!("   - Best Success Rate: {} ({:.1}%)\n", name, rate));
    }
    if let Some((name, rate)) = &findings.worst_success {
        out.push_str(&format!("   - Needs Improvement: {} ({:.1}%)\n", name, rate));
    }
    if let Some((name, cost)) = &findings.most_expensive {
        out.push_str(&format!(
            "   - Most Expensive: {} ({})\n",
            name,
            format_currency(*cost)
        ));
    }
    out
}

/// Grouped table over treatment types.
pub fn treatment_section(by_treatment: &[GroupStats]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("TREATMENT TYPE EFFECTIVENESS"));

    let rows: Vec<Vec<String>> = by_treatment
        .iter()
        .map(|g| {
            vec![
                g.key.clone(),
                g.patient_count.to_string(),
                format_currency(g.avg_cost),
                format!("{:.1}%", g.success_rate),
                format_number(g.avg_stay, 2),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["Treatment", "Patients", "Avg Cost", "Success", "Avg Stay"],
        &rows,
    ));
    out
}

/// Grouped table over age buckets, plus the age ↔ cost correlation.
pub fn age_section(by_age_group: &[GroupStats], age_cost_correlation: f64) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("AGE GROUP ANALYSIS"));

    let rows: Vec<Vec<String>> = by_age_group
        .iter()
        .map(|g| {
            vec![
                g.key.clone(),
                g.patient_count.to_string(),
                format_currency(g.avg_cost),
                format_number(g.avg_stay, 2),
                format!("{:.1}%", g.success_rate),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["Age Group", "Patients", "Avg Cost", "Avg Stay", "Success"],
        &rows,
    ));

    out.push_str(&format!(
        "\nAge-Cost Correlation: {:.3}\n",
        age_cost_correlation
    ));
    if age_cost_correlation > 0.3 {
        out.push_str(
            "   Moderate positive correlation: older patients tend to have higher costs\n",
        );
    }
    out
}

/// Grouped table over insurance types.
pub fn insurance_section(by_insurance: &[GroupStats]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("INSURANCE TYPE ANALYSIS"));

    let rows: Vec<Vec<String>> = by_insurance
        .iter()
        .map(|g| {
            vec![
                g.key.clone(),
                g.patient_count.to_string(),
                format_currency(g.avg_cost),
                format_number(g.avg_stay, 2),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["Insurance", "Patients", "Avg Cost", "Avg Stay"],
        &rows,
    ));
    out
}

/// Admissions and average cost per month.
pub fn monthly_section(monthly: &[MonthlyTrend]) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("MONTHLY ADMISSION TRENDS"));

    let rows: Vec<Vec<String>> = monthly
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                m.admissions.to_string(),
                format_currency(m.avg_cost),
            ]
        })
        .collect();
    out.push_str(&render_table(&["Month", "Admissions", "Avg Cost"], &rows));
    out
}

/// High-cost, long-stay cases.
pub fn cost_optimization_section(subset: &ExpensiveLongStay) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("COST OPTIMIZATION OPPORTUNITIES"));
    out.push_str(&format!(
        "\nHigh-Cost, Long-Stay Cases: {} patients\n",
        subset.patient_count
    ));
    out.push_str(&format!(
        "   Average Cost: {}\n",
        format_currency(subset.avg_cost)
    ));
    out.push_str(&format!("   Average Stay: {:.1} days\n", subset.avg_stay));
    if !subset.top_conditions.is_empty() {
        let listed: Vec<String> = subset
            .top_conditions
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();
        out.push_str(&format!("   Top Conditions: {}\n", listed.join(", ")));
    }
    out
}

/// The full correlation matrix plus the key pairings.
pub fn correlation_section(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("STATISTICAL CORRELATIONS"));

    let mut headers = vec![""];
    headers.extend(CORRELATION_FIELDS);

    let rows: Vec<Vec<String>> = CORRELATION_FIELDS
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let mut row = vec![field.to_string()];
            row.extend((0..CORRELATION_FIELDS.len()).map(|j| format!("{:.3}", matrix.values[i][j])));
            row
        })
        .collect();
    out.push_str(&render_table(&headers, &rows));

    out.push_str("\nKey Correlations:\n");
    out.push_str(&format!(
        "   - Length of Stay / Cost: {:.3}\n",
        matrix.get("length_of_stay", "total_cost")
    ));
    out.push_str(&format!(
        "   - Age / Length of Stay: {:.3}\n",
        matrix.get("age", "length_of_stay")
    ));
    out.push_str(&format!(
        "   - Doctor Visits / Cost: {:.3}\n",
        matrix.get("doctor_visits", "total_cost")
    ));
    out
}

/// Actionable recommendations derived from the findings.
pub fn recommendations_section(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&heading("ACTIONABLE RECOMMENDATIONS"));
    out.push('\n');

    let mut item = 1;
    if let Some((name, rate)) = &result.findings.worst_success {
        out.push_str(&format!(
            "{item}. FOCUS ON {}\n   - Success rate is lowest at {:.1}%\n   - Review treatment protocols and consider specialist consultation\n\n",
            name.to_uppercase(),
            rate
        ));
        item += 1;
    }
    if let Some((name, cost)) = &result.findings.most_expensive {
        out.push_str(&format!(
            "{item}. COST REDUCTION STRATEGY\n   - {} has the highest average cost ({})\n   - Consider preventive care programs to reduce acute cases\n\n",
            name,
            format_currency(*cost)
        ));
        item += 1;
    }
    out.push_str(&format!(
        "{item}. RESOURCE ALLOCATION\n   - {} patients require extended, expensive care\n   - Implement early intervention programs\n\n",
        result.expensive_long_stay.patient_count
    ));
    item += 1;
    out.push_str(&format!(
        "{item}. REDUCE READMISSIONS\n   - Current readmission rate: {:.1}%\n   - Strengthen discharge planning and follow-up care\n\n",
        result.kpis.readmission_rate
    ));
    item += 1;
    if let Some((name, rate)) = &result.findings.best_success {
        out.push_str(&format!(
            "{item}. LEVERAGE SUCCESSFUL TREATMENTS\n   - {} shows a {:.1}% success rate\n   - Apply best practices to other conditions\n",
            name, rate
        ));
    }
    out
}

/// Render the whole report in reading order.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();
    out.push_str(&banner());
    out.push_str(&overview_section(&result.overview));
    out.push_str(&statistics_section(&result.overview));
    out.push_str(&missing_section(&result.overview));
    out.push_str(&cleaning_section());
    out.push_str(&kpi_section(&result.kpis));
    out.push_str(&condition_section(&result.by_condition, &result.findings));
    out.push_str(&treatment_section(&result.by_treatment));
    out.push_str(&age_section(&result.by_age_group, result.age_cost_correlation));
    out.push_str(&insurance_section(&result.by_insurance));
    out.push_str(&monthly_section(&result.monthly));
    out.push_str(&cost_optimization_section(&result.expensive_long_stay));
    out.push_str(&correlation_section(&result.correlations));
    out.push_str(&recommendations_section(result));
    out.push('\n');
    out.push_str(RULE);
    out.push_str("\nAnalysis complete\n");
    out.push_str(RULE);
    out.push('\n');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use report_data::aggregator::OverallKpis;

    fn make_group(key: &str) -> GroupStats {
        GroupStats {
            key: key.to_string(),
            patient_count: 10,
            avg_stay: 4.25,
            avg_cost: 12345.67,
            success_rate: 85.0,
            readmission_rate: 12.0,
        }
    }

    fn make_kpis() -> OverallKpis {
        OverallKpis {
            total_patients: 500,
            avg_stay: 4.26,
            avg_cost: 15833.333,
            success_rate: 83.4,
            readmission_rate: 12.2,
        }
    }

    // ── render_table ──────────────────────────────────────────────────────────

    #[test]
    fn test_render_table_aligns_columns() {
        let table = render_table(
            &["Key", "Count"],
            &[
                vec!["Asthma".to_string(), "5".to_string()],
                vec!["Flu".to_string(), "12".to_string()],
            ],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Key     Count");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "Asthma      5");
        assert_eq!(lines[3], "Flu        12");
    }

    // ── Individual sections ───────────────────────────────────────────────────

    #[test]
    fn test_overview_and_statistics_sections() {
        use report_core::stats::DescriptiveStats;

        let stats = DescriptiveStats {
            count: 3,
            mean: 200.0,
            std: 100.0,
            min: 100.0,
            q25: 150.0,
            median: 200.0,
            q75: 250.0,
            max: 300.0,
        };
        let overview = DatasetOverview {
            row_count: 3,
            first_admission: Some("2024-01-10".to_string()),
            last_discharge: Some("2024-02-08".to_string()),
            columns: vec!["patient_id".to_string(), "total_cost".to_string()],
            numeric_summaries: vec![("total_cost".to_string(), stats)],
            missing_counts: vec![("patient_id".to_string(), 0)],
        };

        let section = overview_section(&overview);
        assert!(section.contains("Total Patients: 3"));
        assert!(section.contains("Date Range: 2024-01-10 to 2024-02-08"));
        assert!(section.contains("Columns: patient_id, total_cost"));

        let stats_section = statistics_section(&overview);
        assert!(stats_section.contains("BASIC STATISTICS"));
        assert!(stats_section.contains("total_cost"));
        assert!(stats_section.contains("200.00"));

        let missing = missing_section(&overview);
        assert!(missing.contains("patient_id"));
    }

    #[test]
    fn test_kpi_section_formats_values() {
        let section = kpi_section(&make_kpis());
        assert!(section.contains("Total Patients Treated: 500"));
        assert!(section.contains("Average Length of Stay: 4.3 days"));
        assert!(section.contains("Average Treatment Cost: $15,833.33"));
        assert!(section.contains("Treatment Success Rate: 83.4%"));
        assert!(section.contains("Readmission Rate: 12.2%"));
    }

    #[test]
    fn test_condition_section_includes_findings() {
        let groups = vec![make_group("Asthma"), make_group("Diabetes")];
        let findings = ConditionFindings {
            best_success: Some(("Asthma".to_string(), 92.5)),
            worst_success: Some(("Diabetes".to_string(), 61.0)),
            most_expensive: Some(("Diabetes".to_string(), 19000.0)),
        };
        let section = condition_section(&groups, &findings);

        assert!(section.contains("ANALYSIS BY MEDICAL CONDITION"));
        assert!(section.contains("Asthma"));
        assert!(section.contains("Best Success Rate: Asthma (92.5%)"));
        assert!(section.contains("Needs Improvement: Diabetes (61.0%)"));
        assert!(section.contains("Most Expensive: Diabetes ($19,000.00)"));
    }

    #[test]
    fn test_age_section_correlation_note_threshold() {
        let groups = vec![make_group("Young (18-35)")];

        let weak = age_section(&groups, 0.12);
        assert!(weak.contains("Age-Cost Correlation: 0.120"));
        assert!(!weak.contains("Moderate positive correlation"));

        let moderate = age_section(&groups, 0.45);
        assert!(moderate.contains("Moderate positive correlation"));
    }

    #[test]
    fn test_cost_optimization_section_empty_subset() {
        let subset = ExpensiveLongStay {
            patient_count: 0,
            avg_cost: 0.0,
            avg_stay: 0.0,
            top_conditions: vec![],
        };
        let section = cost_optimization_section(&subset);
        assert!(section.contains("High-Cost, Long-Stay Cases: 0 patients"));
        assert!(section.contains("Average Cost: $0.00"));
        assert!(!section.contains("Top Conditions"));
    }

    #[test]
    fn test_cost_optimization_section_lists_top_conditions() {
        let subset = ExpensiveLongStay {
            patient_count: 8,
            avg_cost: 22500.0,
            avg_stay: 9.5,
            top_conditions: vec![
                ("Pneumonia".to_string(), 3),
                ("Asthma".to_string(), 2),
            ],
        };
        let section = cost_optimization_section(&subset);
        assert!(section.contains("Top Conditions: Pneumonia (3), Asthma (2)"));
    }

    #[test]
    fn test_correlation_section_key_pairs() {
        let mut values = [[0.0; 5]; 5];
        for (i, row) in values.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        values[1][2] = 0.82;
        values[2][1] = 0.82;
        let matrix = CorrelationMatrix { values };

        let section = correlation_section(&matrix);
        assert!(section.contains("Length of Stay / Cost: 0.820"));
        assert!(section.contains("Age / Length of Stay: 0.000"));
    }

    // ── Whole report ──────────────────────────────────────────────────────────

    #[test]
    fn test_render_report_contains_every_section() {
        use std::io::Write;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("healthcare_data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "patient_id,admission_date,discharge_date,age,condition,treatment_type,\
             insurance_type,length_of_stay,total_cost,doctor_visits,treatment_success,readmitted"
        )
        .unwrap();
        writeln!(file, "P001,2024-01-10,2024-01-11,30,Asthma,Medication,Private,1,100,2,Yes,No")
            .unwrap();
        writeln!(file, "P002,2024-01-20,2024-01-22,45,Diabetes,Surgery,Medicare,2,200,3,No,Yes")
            .unwrap();
        writeln!(file, "P003,2024-02-05,2024-02-08,70,Diabetes,Surgery,Private,3,300,4,Yes,No")
            .unwrap();
        drop(file);

        let result = report_data::analysis::analyze_encounters(&path).unwrap();
        let report = render_report(&result);

        for section in [
            "PATIENT ENCOUNTER ANALYSIS",
            "BASIC STATISTICS",
            "Missing Values:",
            "DATA CLEANING",
            "KEY PERFORMANCE INDICATORS",
            "ANALYSIS BY MEDICAL CONDITION",
            "TREATMENT TYPE EFFECTIVENESS",
            "AGE GROUP ANALYSIS",
            "INSURANCE TYPE ANALYSIS",
            "MONTHLY ADMISSION TRENDS",
            "COST OPTIMIZATION OPPORTUNITIES",
            "STATISTICAL CORRELATIONS",
            "ACTIONABLE RECOMMENDATIONS",
            "Analysis complete",
        ] {
            assert!(report.contains(section), "missing section {section}");
        }

        // Three fixture rows, one expensive long stay.
        assert!(report.contains("Total Patients Treated: 3"));
        assert!(report.contains("High-Cost, Long-Stay Cases: 1 patients"));
    }

    #[test]
    fn test_monthly_section_rows() {
        let monthly = vec![
            MonthlyTrend {
                month: "2024-01".to_string(),
                admissions: 42,
                avg_cost: 15000.0,
            },
            MonthlyTrend {
                month: "2024-02".to_string(),
                admissions: 38,
                avg_cost: 14200.5,
            },
        ];
        let section = monthly_section(&monthly);
        assert!(section.contains("2024-01"));
        assert!(section.contains("42"));
        assert!(section.contains("$14,200.50"));
    }
}
