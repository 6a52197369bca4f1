//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Opens the measurement file
//! 2. Folds every data line into the station table, either in one
//!    streaming pass or sharded across worker threads
//! 3. Renders the sorted report
//! 4. Writes the report and the optional run summary
//!
//! Both execution paths share the same line, parse, and fold code, so a
//! sharded run produces byte-identical output to a streaming run.

use crate::aggregator::StationTable;
use crate::input::{split_shards, LineReader};
use crate::output::{render_report, write_report, write_summary, RunSummary};
use crate::parser::parse_record;
use crate::utils::config::{DEFAULT_READ_BUFFER, MALFORMED_WARN_LIMIT, MAX_WORKERS};
use crate::utils::error::InputError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

/// How malformed data lines are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Skip the line, count it, keep aggregating (default)
    #[default]
    Skip,
    /// Abort the run on the first malformed line; no report is emitted
    Abort,
}

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    /// Path to the measurement file
    pub input: PathBuf,

    /// Output path for the report (stdout when None)
    pub output: Option<PathBuf>,

    /// Worker threads: 1 = streaming single pass, 0 = auto-detect
    pub threads: usize,

    /// Malformed-line policy
    pub policy: MalformedPolicy,

    /// Optional path for a JSON run summary
    pub summary_json: Option<PathBuf>,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: None,
            threads: 1,
            policy: MalformedPolicy::Skip,
            summary_json: None,
        }
    }
}

/// Counters accumulated while folding lines
#[derive(Debug, Clone, Copy, Default)]
struct FoldStats {
    records: u64,
    comments: u64,
    malformed: u64,
}

impl FoldStats {
    fn absorb(&mut self, other: FoldStats) {
        self.records += other.records;
        self.comments += other.comments;
        self.malformed += other.malformed;
    }
}

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Aggregate command arguments
///
/// # Returns
/// Ok if the report was written, Err with context if any step fails
///
/// # Errors
/// * Input file cannot be opened or read
/// * A malformed line under `MalformedPolicy::Abort`
/// * Report or summary write errors
///
/// # Example
/// ```ignore
/// let args = AggregateArgs {
///     input: PathBuf::from("measurements.txt"),
///     output: Some(PathBuf::from("report.txt")),
///     threads: 1,
///     policy: MalformedPolicy::Skip,
///     summary_json: None,
/// };
///
/// execute_aggregate(args)?;
/// ```
pub fn execute_aggregate(args: AggregateArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Aggregating measurements from: {}", args.input.display());

    let workers = resolve_workers(args.threads);

    // Step 1: Fold the input into the station table
    let (table, stats) = if workers <= 1 {
        info!("Step 1/3: Streaming single-pass aggregation...");
        aggregate_streaming(&args)?
    } else {
        info!("Step 1/3: Sharded aggregation across {} workers...", workers);
        aggregate_sharded(&args, workers)?
    };

    debug!(
        "Folded {} records into {} stations ({} comments, {} malformed)",
        stats.records,
        table.len(),
        stats.comments,
        stats.malformed
    );

    // Step 2: Render the report in sorted order
    info!("Step 2/3: Rendering report for {} stations...", table.len());
    let entries = table.sorted_entries();
    let report = render_report(&entries);

    // Step 3: Write outputs
    info!("Step 3/3: Writing output...");
    write_report(&report, args.output.as_deref()).context("Failed to write report")?;

    if let Some(path) = &args.output {
        info!("✓ Report written to: {}", path.display());
    }

    if stats.malformed > 0 {
        warn!("{} malformed lines were skipped", stats.malformed);
    }

    let elapsed = start_time.elapsed();

    if let Some(path) = &args.summary_json {
        let summary = RunSummary::new(
            args.input.display().to_string(),
            table.len(),
            stats.records,
            stats.comments,
            stats.malformed,
            workers,
            elapsed.as_millis() as u64,
        );
        write_summary(&summary, path).context("Failed to write run summary")?;
        info!("✓ Run summary written to: {}", path.display());
    }

    info!(
        "Aggregated {} records in {:.2}s",
        stats.records,
        elapsed.as_secs_f64()
    );

    Ok(())
}

/// Resolve the worker count, 0 meaning auto-detect
///
/// **Private** - internal helper for execute_aggregate
fn resolve_workers(threads: usize) -> usize {
    if threads == 0 {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    } else {
        threads
    }
}

/// Single-threaded streaming pass over a buffered reader
///
/// **Private** - internal helper for execute_aggregate
///
/// Memory use is bounded by the read buffer plus the longest line; the
/// file is never loaded whole.
fn aggregate_streaming(args: &AggregateArgs) -> Result<(StationTable, FoldStats)> {
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open input file: {}", args.input.display()))?;
    let reader = BufReader::with_capacity(DEFAULT_READ_BUFFER, file);

    let mut lines = LineReader::new(reader);
    let mut table = StationTable::new();
    let mut stats = FoldStats::default();
    aggregate_lines(&mut lines, &mut table, args.policy, &mut stats)?;

    Ok((table, stats))
}

/// Parallel pass: memory-map the file, shard it, fold shards in worker
/// threads, then merge the per-shard tables in shard order
///
/// **Private** - internal helper for execute_aggregate
///
/// Merging in shard order keeps first-seen station casing identical to
/// a streaming run over the same bytes.
fn aggregate_sharded(args: &AggregateArgs, workers: usize) -> Result<(StationTable, FoldStats)> {
    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open input file: {}", args.input.display()))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat input file: {}", args.input.display()))?
        .len();
    if len == 0 {
        // Zero-length mappings are rejected on some platforms
        return Ok((StationTable::new(), FoldStats::default()));
    }

    // Safety: the mapping is read-only and dropped before this function
    // returns; concurrent truncation of the input is not supported.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|source| InputError::Mmap {
        path: args.input.display().to_string(),
        source,
    })?;
    let buf: &[u8] = &mmap;

    let shards = split_shards(buf, workers);
    debug!("Split {} bytes into {} shards", buf.len(), shards.len());

    let policy = args.policy;
    let results: Vec<Result<(StationTable, FoldStats)>> = std::thread::scope(|scope| {
        let handles: Vec<_> = shards
            .iter()
            .cloned()
            .map(|range| {
                let shard = &buf[range];
                scope.spawn(move || aggregate_shard(shard, policy))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut table = StationTable::new();
    let mut stats = FoldStats::default();
    for result in results {
        let (shard_table, shard_stats) = result?;
        table.merge(shard_table);
        stats.absorb(shard_stats);
    }

    Ok((table, stats))
}

/// Fold one shard into a private table
///
/// **Private** - runs on a worker thread
fn aggregate_shard(shard: &[u8], policy: MalformedPolicy) -> Result<(StationTable, FoldStats)> {
    let mut lines = LineReader::new(shard);
    let mut table = StationTable::new();
    let mut stats = FoldStats::default();
    aggregate_lines(&mut lines, &mut table, policy, &mut stats)?;
    Ok((table, stats))
}

/// The shared fold loop: lines in, table entries out
///
/// **Private** - the one place where parse results meet the table,
/// used identically by the streaming and sharded paths
fn aggregate_lines<R: BufRead>(
    lines: &mut LineReader<R>,
    table: &mut StationTable,
    policy: MalformedPolicy,
    stats: &mut FoldStats,
) -> Result<()> {
    while let Some(line) = lines.next_line().context("Failed to read input line")? {
        match parse_record(line) {
            Ok(record) => {
                table.fold(record.station, record.value);
                stats.records += 1;
            }
            Err(err) => match policy {
                MalformedPolicy::Skip => {
                    stats.malformed += 1;
                    if stats.malformed <= MALFORMED_WARN_LIMIT {
                        warn!("Skipping malformed line {:?}: {}", preview(line), err);
                    } else if stats.malformed == MALFORMED_WARN_LIMIT + 1 {
                        warn!("Further malformed lines will be skipped silently");
                    }
                }
                MalformedPolicy::Abort => {
                    return Err(err)
                        .with_context(|| format!("Malformed line {:?}", preview(line)));
                }
            },
        }
    }

    stats.comments = lines.comments_skipped();
    Ok(())
}

/// Truncated, lossily decoded view of a line for log messages
///
/// **Private** - internal utility
fn preview(line: &[u8]) -> String {
    String::from_utf8_lossy(line).chars().take(64).collect()
}

/// Validate aggregate arguments
///
/// **Public** - can be called before execute_aggregate for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &AggregateArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.threads > MAX_WORKERS {
        anyhow::bail!("threads is too large (max {})", MAX_WORKERS);
    }

    if let Some(output) = &args.output {
        if output.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }
    }

    if let Some(summary) = &args.summary_json {
        if summary.as_os_str().is_empty() {
            anyhow::bail!("Summary path cannot be empty");
        }
    }

    Ok(())
}
