//! Aggregation of parsed records into per-station summaries.
//!
//! This module transforms parsed records into:
//! - Running per-station summaries (min, max, total, count)
//! - A case-insensitive station table with first-seen spellings
//! - Deterministically sorted entries for the reporter

pub mod summary;
pub mod table;

// Re-export main types and functions
pub use summary::Summary;
pub use table::{StationEntry, StationTable};
