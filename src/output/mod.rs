//! Output writers for the report and run summary.
//!
//! This module handles writing results to disk or stdout:
//! - The single-line min/mean/max report
//! - An optional JSON run summary for pipelines

pub mod report;
pub mod summary_json;

// Re-export main functions
pub use report::{render_report, write_report};
pub use summary_json::{read_summary, write_summary, RunSummary};
