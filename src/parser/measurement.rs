//! Fixed-point measurement values.
//!
//! Measurements arrive as decimal text with at most one fractional digit
//! (`-3.2`, `27.0`, `5`). They are stored as integers scaled by 10,000 so
//! that repeated summation stays exact; floats never enter the pipeline.

use crate::utils::config::UNITS_PER_TENTH;
use crate::utils::error::ParseError;
use std::fmt;

/// A single measurement in scaled fixed-point units
///
/// Ordering and equality follow the underlying scaled integer, so two
/// measurements compare the way their decimal values do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Measurement(i64);

impl Measurement {
    /// Construct from a raw scaled value (10,000 units = 1.0)
    pub const fn from_scaled(raw: i64) -> Self {
        Self(raw)
    }

    /// Construct from tenths, the precision of the text format
    pub const fn from_tenths(tenths: i64) -> Self {
        Self(tenths * UNITS_PER_TENTH)
    }

    /// The raw scaled value
    pub const fn scaled(self) -> i64 {
        self.0
    }

    /// The value in tenths
    ///
    /// Exact for every value produced by [`Measurement::parse`], which
    /// only ever yields whole numbers of tenths.
    pub const fn tenths(self) -> i64 {
        self.0 / UNITS_PER_TENTH
    }

    /// Parse measurement text into a scaled value
    ///
    /// **Public** - main entry point for value parsing
    ///
    /// Accepts an optional leading `-`, one or more integer digits, and
    /// at most one fractional digit (`12`, `12.3`, `-0.7`). Everything
    /// else is rejected, including empty input, a bare sign, multiple
    /// dots, and more than one fractional digit.
    ///
    /// # Errors
    /// * `ParseError::InvalidMeasurement` - text outside the grammar
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let (negative, digits) = match bytes.split_first() {
            Some((b'-', rest)) => (true, rest),
            _ => (false, bytes),
        };

        let (int_part, frac_digit) = match digits.iter().position(|&b| b == b'.') {
            Some(dot) => {
                let frac = &digits[dot + 1..];
                if frac.len() != 1 {
                    return Err(invalid(bytes));
                }
                (&digits[..dot], Some(frac[0]))
            }
            None => (digits, None),
        };

        if int_part.is_empty() {
            return Err(invalid(bytes));
        }

        let mut tenths: i64 = 0;
        for &b in int_part {
            if !b.is_ascii_digit() {
                return Err(invalid(bytes));
            }
            tenths = tenths
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or_else(|| invalid(bytes))?;
        }

        tenths = tenths.checked_mul(10).ok_or_else(|| invalid(bytes))?;
        match frac_digit {
            Some(b) if b.is_ascii_digit() => tenths += i64::from(b - b'0'),
            Some(_) => return Err(invalid(bytes)),
            None => {}
        }

        if negative {
            tenths = -tenths;
        }

        tenths
            .checked_mul(UNITS_PER_TENTH)
            .map(Self)
            .ok_or_else(|| invalid(bytes))
    }
}

impl fmt::Display for Measurement {
    /// Render with exactly one fractional digit, e.g. `-3.2` or `0.0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.tenths();
        let sign = if tenths < 0 { "-" } else { "" };
        let abs = tenths.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

/// **Private** - build the error carrying the offending text
fn invalid(bytes: &[u8]) -> ParseError {
    ParseError::InvalidMeasurement(String::from_utf8_lossy(bytes).into_owned())
}
