//! Per-trace layout table for a ground-roll gather.
//!
//! Prints how each trace of the reference gather is derived and where it
//! lands: chirp duration, sample count, taper edge, start row, decay and the
//! placement outcome.
//!
//! # Output Format
//!
//! Markdown table, one row per trace, up to and including the trace that
//! halts the build.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example trace_table
//! ```

use groundroll::synthesis::{Trace, TraceOutcome};
use groundroll::SynthesisParameters;
use ndarray::Array1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = SynthesisParameters::default();
    params.validate()?;

    println!("Ground-Roll Trace Layout");
    println!("========================");
    println!(
        "{} traces x {} samples, dt = {} s, {:.1} samples of moveout per trace",
        params.num_traces,
        params.num_time_samples,
        params.dt,
        params.samples_per_trace()
    );
    println!();

    println!("| Trace | Duration (s) | Samples | n_edge | Start row | Decay | Outcome |");
    println!("|-------|--------------|---------|--------|-----------|-------|---------|");

    for index in 0..params.num_traces {
        let trace = Trace::new(&params, index);
        let window = trace.window();
        let mut column = Array1::<f64>::zeros(params.num_time_samples);
        let outcome = trace.render_into(column.view_mut());

        let described = match outcome {
            TraceOutcome::Placed { .. } => "placed".to_string(),
            TraceOutcome::Truncated { kept, .. } => format!("truncated to {kept}"),
            TraceOutcome::SkippedWindow { .. } => "skipped (window)".to_string(),
            TraceOutcome::Halted { .. } => "halt".to_string(),
        };

        println!(
            "| {} | {:.2} | {} | {} | {} | {:.4} | {} |",
            index,
            trace.duration(),
            trace.sample_count(),
            window.n_edge(),
            trace.offset(),
            trace.decay(),
            described
        );

        if matches!(outcome, TraceOutcome::Halted { .. }) {
            break;
        }
    }

    Ok(())
}
