//! Generate command implementation.
//!
//! Writes a synthetic measurement file: a short comment header followed
//! by `station;value` lines. Values are drawn from a per-station normal
//! distribution around a fixed mean, clamped to one fractional digit in
//! [-99.9, 99.9]. With a seed the output is fully reproducible.

use crate::utils::config::DEFAULT_READ_BUFFER;
use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Station pool with plausible yearly mean temperatures
const STATION_POOL: &[(&str, f64)] = &[
    ("Abha", 18.0),
    ("Accra", 26.4),
    ("Addis Ababa", 16.0),
    ("Amsterdam", 10.2),
    ("Athens", 19.2),
    ("Auckland", 15.2),
    ("Baghdad", 22.77),
    ("Bangkok", 28.6),
    ("Barcelona", 18.2),
    ("Beijing", 12.9),
    ("Berlin", 10.3),
    ("Bogotá", 14.3),
    ("Bordeaux", 14.2),
    ("Brussels", 10.5),
    ("Bucharest", 10.8),
    ("Cairo", 21.4),
    ("Cape Town", 16.2),
    ("Chicago", 9.8),
    ("Copenhagen", 9.1),
    ("Dakar", 24.0),
    ("Denver", 10.4),
    ("Dubai", 26.9),
    ("Dublin", 9.8),
    ("Edinburgh", 9.3),
    ("Hamburg", 9.7),
    ("Helsinki", 5.9),
    ("Istanbul", 13.9),
    ("Jakarta", 26.7),
    ("Lisbon", 17.0),
    ("London", 11.3),
    ("Madrid", 15.0),
    ("Mexico City", 17.5),
    ("Moscow", 5.8),
    ("Nairobi", 17.8),
    ("New York", 12.9),
    ("Oslo", 5.7),
    ("Paris", 12.3),
    ("Prague", 8.4),
    ("Reykjavík", 4.3),
    ("Rome", 15.2),
    ("San Francisco", 14.6),
    ("São Paulo", 19.8),
    ("Seoul", 12.5),
    ("Singapore", 27.0),
    ("Stockholm", 6.6),
    ("Sydney", 17.7),
    ("Tokyo", 15.4),
    ("Vienna", 10.4),
    ("Warsaw", 8.5),
    ("Zürich", 9.3),
];

/// Standard deviation applied to every station's distribution
const STATION_STD_DEV: f64 = 10.0;

/// Arguments for the generate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    /// Output path for the generated file
    pub output: PathBuf,

    /// Number of data records to write
    pub records: u64,

    /// Number of distinct stations to draw from
    pub stations: usize,

    /// RNG seed; None draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            output: PathBuf::from("measurements.txt"),
            records: 1_000_000,
            stations: STATION_POOL.len(),
            seed: None,
        }
    }
}

/// Execute the generate command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Generate command arguments
///
/// # Returns
/// Ok if the file was written, Err with context if any step fails
pub fn execute_generate(args: GenerateArgs) -> Result<()> {
    let start_time = Instant::now();

    info!(
        "Generating {} records across {} stations to: {}",
        args.records,
        args.stations,
        args.output.display()
    );

    // Step 1: Prepare per-station distributions
    info!("Step 1/2: Preparing station distributions...");
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let stations: Vec<(&str, Normal<f64>)> = STATION_POOL[..args.stations]
        .iter()
        .map(|(name, mean)| {
            Normal::new(*mean, STATION_STD_DEV)
                .map(|dist| (*name, dist))
                .context("Failed to build station distribution")
        })
        .collect::<Result<_>>()?;

    // Step 2: Write the file
    info!("Step 2/2: Writing records...");
    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create output file: {}", args.output.display()))?;
    let mut writer = BufWriter::with_capacity(DEFAULT_READ_BUFFER, file);

    writeln!(writer, "# {} synthetic measurement records", args.records)?;
    match args.seed {
        Some(seed) => writeln!(writer, "# seed: {}", seed)?,
        None => writeln!(writer, "# seed: os entropy")?,
    }

    for _ in 0..args.records {
        let (name, dist) = &stations[rng.random_range(0..stations.len())];
        let value = dist.sample(&mut rng).clamp(-99.9, 99.9);
        writeln!(writer, "{};{:.1}", name, value)?;
    }

    writer.flush().context("Failed to flush output file")?;

    let bytes = std::fs::metadata(&args.output).map(|m| m.len()).unwrap_or(0);
    let elapsed = start_time.elapsed();
    info!(
        "✓ Wrote {} records ({} bytes) in {:.2}s",
        args.records,
        bytes,
        elapsed.as_secs_f64()
    );

    Ok(())
}

/// Validate generate arguments
///
/// **Public** - can be called before execute_generate for early validation
pub fn validate_args(args: &GenerateArgs) -> Result<()> {
    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.records == 0 {
        anyhow::bail!("records must be greater than 0");
    }

    if args.stations == 0 {
        anyhow::bail!("stations must be greater than 0");
    }

    if args.stations > STATION_POOL.len() {
        anyhow::bail!("stations is too large (max {})", STATION_POOL.len());
    }

    Ok(())
}
