//! Report rendering and writing.
//!
//! The report is a single line in the shape
//! `{Athens=12.0/19.1/28.3, Berlin=-3.2/8.0/22.1}` followed by exactly
//! one newline. Entries are separated by `", "` with no separator after
//! the last entry, and an empty table renders as `{}`. Every value
//! carries exactly one fractional digit.

use crate::aggregator::StationEntry;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Render the final report from sorted entries
///
/// **Public** - main entry point for report formatting
///
/// # Arguments
/// * `entries` - entries in report order, as produced by
///   `StationTable::sorted_entries`
///
/// # Returns
/// The complete report text, trailing newline included
pub fn render_report(entries: &[&StationEntry]) -> String {
    let mut out = String::with_capacity(entries.len() * 24 + 4);
    out.push('{');

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let summary = &entry.summary;
        out.push_str(&format!(
            "{}={}/{}/{}",
            entry.station,
            summary.min(),
            summary.mean(),
            summary.max()
        ));
    }

    out.push_str("}\n");
    out
}

/// Write the report to a file, or to stdout when no path is given
///
/// **Public** - terminal step of every successful run
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - path is empty or a directory
pub fn write_report(report: &str, output_path: Option<&Path>) -> Result<(), OutputError> {
    match output_path {
        Some(path) => {
            validate_output_path(path)?;

            // Create parent directories if needed
            if let Some(parent) = path.parent() {
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

            let file = File::create(path).map_err(OutputError::WriteFailed)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(report.as_bytes())?;
            writer.flush()?;

            info!(
                "Report written to: {} ({} bytes)",
                path.display(),
                report.len()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(report.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
