//! Synthesize a single ground-roll gather and save it as `.npy`
//!
//! # Usage
//!
//! ```bash
//! # Reference gather: 100 traces x 1000 samples
//! cargo run --release --bin synth_gather
//!
//! # Wider taper, longer record, parallel columns
//! cargo run --release --bin synth_gather -- --win-scale 2 --num-time-samples 3000 --mode parallel
//!
//! # Custom destination
//! cargo run --release --bin synth_gather -- --output out/gather.npy
//! ```

use clap::Parser;
use groundroll::shared_args::{ExecutionMode, SynthesisArgs};
use groundroll::{synthesize_gather, synthesize_gather_parallel, MatrixStore, NpyStore};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Ground-Roll Gather Synthesizer",
    about = "Synthesizes one ground-roll noise gather (time samples x traces)",
    long_about = None
)]
struct Args {
    #[command(flatten)]
    synthesis: SynthesisArgs,

    /// Destination .npy file
    #[arg(long, default_value = "./syn_data/sample_groundroll.npy")]
    output: PathBuf,

    /// Render columns on one thread or across all cores
    #[arg(long, value_enum, default_value_t = ExecutionMode::Sequential)]
    mode: ExecutionMode,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let params = args.synthesis.to_parameters();

    info!("Synthesizing gather ({} mode): {:?}", args.mode, params);
    let gather = match args.mode {
        ExecutionMode::Sequential => synthesize_gather(&params)?,
        ExecutionMode::Parallel => synthesize_gather_parallel(&params)?,
    };

    NpyStore.store(&gather.data, &args.output)?;

    let summary = &gather.summary;
    println!(
        "Gather {} x {} written to {}",
        params.num_time_samples,
        params.num_traces,
        args.output.display()
    );
    println!("  Placed in full:  {}", summary.placed);
    println!("  Truncated:       {}", summary.truncated);
    println!("  Skipped windows: {}", summary.skipped.len());
    match summary.halted_at {
        Some(index) => println!("  Halted at trace: {index}"),
        None => println!("  Halted at trace: -"),
    }

    Ok(())
}
