//! Configuration and constants for the CLI.

/// Current run-summary schema version
pub const SUMMARY_SCHEMA_VERSION: &str = "1.0.0";

// Constants for the fixed-point measurement representation
// Input values carry at most one fractional digit; storing them scaled
// by 10,000 keeps sums exact and leaves headroom for finer inputs later
// 1 unit = 0.0001 measured units
pub const MEASUREMENT_SCALE: i64 = 10_000;

/// Scaled units per output tenth (the precision of the text format)
pub const UNITS_PER_TENTH: i64 = MEASUREMENT_SCALE / 10;

/// Read buffer capacity for the streaming input path
pub const DEFAULT_READ_BUFFER: usize = 1 << 20; // 1 MiB

/// Upper bound on worker threads accepted from the CLI
pub const MAX_WORKERS: usize = 512;

/// How many malformed lines are individually logged before going quiet
pub const MALFORMED_WARN_LIMIT: u64 = 10;
