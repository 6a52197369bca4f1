//! Station Stats
//!
//! Streaming min/mean/max aggregation for `station;value`
//! measurement files.
//!
//! This crate provides the core implementation for the
//! `station-stats` CLI tool: a buffered line source, a fixed-point
//! record parser, a case-insensitive station table, and a
//! deterministic sorted reporter.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install station-stats
//! station-stats --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod input;
pub mod output;
pub mod parser;
pub mod utils;
