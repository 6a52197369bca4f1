//! Record parsing and fixed-point measurement values.
//!
//! This module handles:
//! - Parsing decimal measurement text into scaled integers
//! - Splitting raw lines into (station, measurement) records
//! - Rejecting malformed lines with precise error reasons

pub mod measurement;
pub mod record;

// Re-export main types
pub use measurement::Measurement;
pub use record::{parse_record, RawRecord};
