//! JSON run-summary writer.
//!
//! An optional machine-readable artifact describing one aggregation
//! run: how much input was seen, how much was skipped, and how the run
//! was executed. Written next to the report for pipelines that want to
//! assert on counts without re-parsing the report text.

use crate::utils::config::SUMMARY_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Machine-readable description of one aggregation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Schema version of this document
    pub version: String,

    /// Input file the run aggregated
    pub input: String,

    /// Distinct stations in the report
    pub stations: usize,

    /// Data records folded into the table
    pub records: u64,

    /// Comment lines filtered out
    pub comments_skipped: u64,

    /// Malformed lines skipped (always 0 under strict mode)
    pub malformed_skipped: u64,

    /// Worker threads the run executed with
    pub workers: usize,

    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,

    /// RFC 3339 timestamp of when the summary was written
    pub generated_at: String,
}

impl RunSummary {
    /// Assemble a summary with the current schema version and timestamp
    pub fn new(
        input: String,
        stations: usize,
        records: u64,
        comments_skipped: u64,
        malformed_skipped: u64,
        workers: usize,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            version: SUMMARY_SCHEMA_VERSION.to_string(),
            input,
            stations,
            records,
            comments_skipped,
            malformed_skipped,
            workers,
            elapsed_ms,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write a run summary to a JSON file
///
/// **Public** - invoked when the CLI asks for a summary artifact
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - path cannot be created or is invalid
pub fn write_summary(summary: &RunSummary, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    if output_path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, summary).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a run summary back from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - file read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_summary(input_path: impl AsRef<Path>) -> Result<RunSummary, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading run summary from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let summary: RunSummary =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(summary)
}
