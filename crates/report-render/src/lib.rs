//! Render layer for the encounter report.
//!
//! Formats the analysis result into the human-readable console report and
//! into the dashboard JSON document written for downstream display.

pub mod dashboard;
pub mod sections;

pub use report_core as core;
