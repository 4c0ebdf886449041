use clap::Parser;
use std::path::PathBuf;

/// Batch analytics report over patient encounter data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "encounter-report",
    about = "Descriptive statistics and grouped aggregates over patient encounters",
    version
)]
pub struct Settings {
    /// Path to the encounter CSV file
    #[arg(long, default_value = "healthcare_data.csv")]
    pub input: PathBuf,

    /// Path the dashboard JSON document is written to
    #[arg(long, default_value = "analysis_results.json")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_fixed_paths() {
        let settings = Settings::try_parse_from(["encounter-report"]).unwrap();
        assert_eq!(settings.input, PathBuf::from("healthcare_data.csv"));
        assert_eq!(settings.output, PathBuf::from("analysis_results.json"));
        assert_eq!(settings.log_level, "INFO");
    }

    #[test]
    fn test_explicit_paths() {
        let settings = Settings::try_parse_from([
            "encounter-report",
            "--input",
            "/data/q3.csv",
            "--output",
            "/tmp/out.json",
        ])
        .unwrap();
        assert_eq!(settings.input, PathBuf::from("/data/q3.csv"));
        assert_eq!(settings.output, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let result = Settings::try_parse_from(["encounter-report", "--log-level", "LOUD"]);
        assert!(result.is_err());
    }
}
