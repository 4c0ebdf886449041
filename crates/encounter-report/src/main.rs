mod bootstrap;

use anyhow::Result;
use clap::Parser;
use report_core::settings::Settings;
use report_data::analysis::analyze_encounters;
use report_render::dashboard::{self, DashboardData};
use report_render::sections;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("encounter-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, Output: {}",
        settings.input.display(),
        settings.output.display()
    );

    // Run the full pipeline; any malformed input aborts here.
    let result = analyze_encounters(&settings.input)?;

    // The human-readable report goes to stdout.
    print!("{}", sections::render_report(&result));

    // The dashboard document goes to the results file.
    let data = DashboardData::from_analysis(&result);
    dashboard::write_dashboard(&data, &settings.output)?;

    println!(
        "Analysis complete. Results saved to '{}'",
        settings.output.display()
    );

    Ok(())
}
