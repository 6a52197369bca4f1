//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod aggregate;
pub mod generate;

// Re-export main command functions
pub use aggregate::{execute_aggregate, AggregateArgs, MalformedPolicy};
pub use generate::{execute_generate, GenerateArgs};
