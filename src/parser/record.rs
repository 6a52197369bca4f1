//! Record parsing for `station;value` lines.
//!
//! Splits a raw data line on the first `;` into a station name and a
//! measurement. Pure and stateless: a rejected line leaves nothing
//! behind, which is what lets the driver skip malformed input safely.

use super::measurement::Measurement;
use crate::utils::error::ParseError;

/// A parsed record borrowing the station name from its source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    /// Station name exactly as spelled in the input
    pub station: &'a str,
    /// Measurement value in scaled fixed-point units
    pub value: Measurement,
}

/// Parse one data line into a record
///
/// **Public** - main entry point for record parsing
///
/// The line must already be stripped of its terminator. The first `;`
/// is the delimiter: everything before it is the station name, which
/// may itself contain any other bytes as long as they form valid UTF-8;
/// everything after it must be a well-formed measurement.
///
/// # Errors
/// * `ParseError::MissingDelimiter` - no `;` anywhere in the line
/// * `ParseError::EmptyStation` - line starts with `;`
/// * `ParseError::InvalidStationUtf8` - station bytes are not UTF-8
/// * `ParseError::InvalidMeasurement` - value text outside the grammar
pub fn parse_record(line: &[u8]) -> Result<RawRecord<'_>, ParseError> {
    let delimiter = line
        .iter()
        .position(|&b| b == b';')
        .ok_or(ParseError::MissingDelimiter)?;

    let station_bytes = &line[..delimiter];
    let value_bytes = &line[delimiter + 1..];

    if station_bytes.is_empty() {
        return Err(ParseError::EmptyStation);
    }

    let station =
        std::str::from_utf8(station_bytes).map_err(|_| ParseError::InvalidStationUtf8)?;
    let value = Measurement::parse(value_bytes)?;

    Ok(RawRecord { station, value })
}
