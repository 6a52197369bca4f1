//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while acquiring input bytes
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to memory-map {path}: {source}")]
    Mmap {
        path: String,
        source: std::io::Error,
    },
}

/// Errors that can occur while parsing a single record line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Missing ';' delimiter")]
    MissingDelimiter,

    #[error("Empty station name")]
    EmptyStation,

    #[error("Station name is not valid UTF-8")]
    InvalidStationUtf8,

    #[error("Invalid measurement: {0:?}")]
    InvalidMeasurement(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
