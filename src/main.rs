//! Station Stats CLI
//!
//! A streaming aggregation tool for `station;value` measurement files.
//! Computes per-station min/mean/max in a single pass, optionally
//! sharded across worker threads.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use station_stats::commands::{
    aggregate, execute_aggregate, execute_generate, generate, AggregateArgs, GenerateArgs,
    MalformedPolicy,
};
use station_stats::utils::config::SUMMARY_SCHEMA_VERSION;

/// Station Stats - min/mean/max aggregation for measurement files
#[derive(Parser, Debug)]
#[command(name = "station-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a measurement file into a min/mean/max report
    Aggregate {
        /// Path to the measurement file (station;value per line)
        input: PathBuf,

        /// Output path for the report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Worker threads (1 = streaming single pass, 0 = auto-detect)
        #[arg(short, long, default_value = "1")]
        threads: usize,

        /// Abort on the first malformed line instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Write a JSON run summary to this path
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// Generate a synthetic measurement file
    Generate {
        /// Output path for the generated file
        output: PathBuf,

        /// Number of data records to write
        #[arg(short, long, default_value = "1000000")]
        records: u64,

        /// Number of distinct stations to draw from
        #[arg(short, long, default_value = "50")]
        stations: usize,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a run-summary JSON file
    Validate {
        /// Path to run-summary JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Aggregate {
            input,
            output,
            threads,
            strict,
            summary_json,
        } => {
            let policy = if strict {
                MalformedPolicy::Abort
            } else {
                MalformedPolicy::Skip
            };

            let args = AggregateArgs {
                input,
                output,
                threads,
                policy,
                summary_json,
            };

            // Validate args first
            aggregate::validate_args(&args)?;

            execute_aggregate(args)?;
        }

        Commands::Generate {
            output,
            records,
            stations,
            seed,
        } => {
            let args = GenerateArgs {
                output,
                records,
                stations,
                seed,
            };

            generate::validate_args(&args)?;

            execute_generate(args)?;
        }

        Commands::Validate { file } => {
            validate_summary_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a run-summary JSON file
///
/// **Private** - internal command implementation
fn validate_summary_file(file_path: PathBuf) -> Result<()> {
    use station_stats::output::read_summary;

    println!("Validating run summary: {}", file_path.display());

    let summary = read_summary(&file_path)?;

    println!("✓ Valid run summary JSON");
    println!("  Version: {}", summary.version);
    println!("  Input: {}", summary.input);
    println!("  Stations: {}", summary.stations);
    println!("  Records: {}", summary.records);
    println!("  Comments skipped: {}", summary.comments_skipped);
    println!("  Malformed skipped: {}", summary.malformed_skipped);
    println!("  Workers: {}", summary.workers);

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Station Stats v{}", env!("CARGO_PKG_VERSION"));
    println!("Run-summary Schema: v{}", SUMMARY_SCHEMA_VERSION);
    println!();
    println!("Streaming min/mean/max aggregation for measurement files.");
}
