//! Input acquisition: buffered line reading and shard splitting.
//!
//! This module handles:
//! - Streaming lines out of any buffered reader
//! - Comment filtering and terminator stripping
//! - Cutting a memory-mapped buffer into line-aligned shards

pub mod lines;
pub mod shard;

// Re-export main types
pub use lines::LineReader;
pub use shard::split_shards;
