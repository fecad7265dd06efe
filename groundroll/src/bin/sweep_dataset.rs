//! Generate a ground-roll training dataset by sweeping gather parameters
//!
//! Walks the Cartesian product of the parameter lists, skips combinations
//! whose longest trace cannot be tapered, and writes each remaining gather as
//! `<output-dir>/<prefix>_<n>.npy` until `--max-artifacts` have been written.
//! A `sweep_report.json` with counts and per-artifact parameters is written
//! next to the artifacts.
//!
//! # Usage
//!
//! ```bash
//! # Reference sweep (177147 combinations, capped at 50000 artifacts)
//! cargo run --release --bin sweep_dataset
//!
//! # Small sweep with explicit lists
//! cargo run --release --bin sweep_dataset -- --num-traces 50 --dt 0.002 --max-artifacts 100
//!
//! # Lists from a JSON config, generated across 8 workers
//! cargo run --release --bin sweep_dataset -- --config sweep.json --mode parallel --jobs 8
//! ```

use clap::Parser;
use groundroll::shared_args::{ExecutionMode, RangeArgs};
use groundroll::{NpyStore, SweepConfig, SweepDriver};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Ground-Roll Dataset Sweep",
    about = "Generates ground-roll gathers over a grid of synthesis parameters",
    long_about = None
)]
struct Args {
    /// JSON sweep config; command line options override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    ranges: RangeArgs,

    /// Stop after this many artifacts (default: 50000)
    #[arg(long)]
    max_artifacts: Option<usize>,

    /// Directory receiving the artifacts (default: ./syn_data)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Artifact file name prefix (default: sample_groundroll)
    #[arg(long)]
    prefix: Option<String>,

    /// Walk combinations in order or across a worker pool
    #[arg(long, value_enum, default_value_t = ExecutionMode::Sequential)]
    mode: ExecutionMode,

    /// Worker count for parallel mode (default: number of CPUs)
    #[arg(long)]
    jobs: Option<usize>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    no_progress: bool,
}

impl Args {
    fn to_config(&self) -> Result<SweepConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading sweep config from {}", path.display());
                SweepConfig::from_json_file(path)?
            }
            None => SweepConfig::default(),
        };

        self.ranges.apply_to(&mut config.ranges);
        if let Some(max_artifacts) = self.max_artifacts {
            config.max_artifacts = max_artifacts;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.file_prefix = prefix.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.to_config()?;

    let total = config.ranges.combination_count()?;
    let expected = config.max_artifacts.min(total) as u64;

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(expected)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let store = NpyStore;
    let driver = SweepDriver::new(&config, &store).with_progress(progress);
    let report = match args.mode {
        ExecutionMode::Sequential => driver.run()?,
        ExecutionMode::Parallel => driver.run_parallel(args.jobs)?,
    };

    let report_path = config.report_path();
    report.write_json(&report_path)?;

    println!("Generated {} images.", report.generated);
    println!(
        "  Visited {} of {} combinations ({} rejected by window, {} invalid)",
        report.enumerated, report.total_combinations, report.rejected_window, report.rejected_invalid
    );
    if !report.failures.is_empty() {
        println!("  {} artifacts failed to write", report.failures.len());
    }
    println!("  Report: {}", report_path.display());

    Ok(())
}
