//! Line-aligned sharding of an in-memory input buffer.
//!
//! Splits a byte buffer into contiguous ranges for worker threads. Cuts
//! start at even byte offsets and are then pushed forward to the next
//! line boundary, so no line is ever split across two shards and every
//! byte belongs to exactly one shard.

use std::ops::Range;

/// Split `buf` into at most `workers` line-aligned shards
///
/// **Public** - drives the parallel aggregation path
///
/// Every internal boundary sits immediately after a `\n`; only the last
/// shard may end without one (a final unterminated line). Shards cover
/// the buffer exactly and in order. When the input has fewer lines than
/// workers, trailing shards come back empty, which workers handle as
/// zero records.
pub fn split_shards(buf: &[u8], workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk = buf.len() / workers;
    let mut shards = Vec::with_capacity(workers);
    let mut start = 0;

    for i in 1..=workers {
        let end = if i == workers {
            buf.len()
        } else {
            let nominal = chunk * i;
            if nominal <= start {
                // Previous shard already consumed past this cut
                start
            } else {
                next_line_start(buf, nominal)
            }
        };
        shards.push(start..end);
        start = end;
    }

    shards
}

/// Advance `pos` past the next newline, or to the end of the buffer
fn next_line_start(buf: &[u8], pos: usize) -> usize {
    match buf[pos..].iter().position(|&b| b == b'\n') {
        Some(offset) => pos + offset + 1,
        None => buf.len(),
    }
}
