//! Gather construction: one zero-initialized matrix, one column per trace.
//!
//! Traces are rendered in index order. A trace whose window is invalid leaves
//! its column at zero and the build moves on; the first trace whose offset
//! lies beyond the gather stops the build, since offsets never decrease.

use log::{debug, trace};
use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis};

use crate::params::{ParameterError, SynthesisParameters};
use crate::synthesis::trace::{Trace, TraceOutcome};

/// Bookkeeping for one gather build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatherSummary {
    /// Traces written in full
    pub placed: usize,
    /// Traces clipped at the bottom of the gather
    pub truncated: usize,
    /// Trace indices skipped because their window was invalid
    pub skipped: Vec<usize>,
    /// Index of the trace that stopped the build, if any
    pub halted_at: Option<usize>,
}

impl GatherSummary {
    /// Number of traces that wrote into the gather.
    pub fn live_traces(&self) -> usize {
        self.placed + self.truncated
    }

    /// Fold one outcome in. Returns false once the build must stop.
    fn record(&mut self, index: usize, outcome: TraceOutcome) -> bool {
        match outcome {
            TraceOutcome::Placed { .. } => self.placed += 1,
            TraceOutcome::Truncated { .. } => self.truncated += 1,
            TraceOutcome::SkippedWindow { n_edge, len } => {
                debug!(
                    "Skipping trace {index}: n_edge {n_edge} >= {}",
                    len as f64 / 2.0
                );
                self.skipped.push(index);
            }
            TraceOutcome::Halted { offset } => {
                trace!("Trace {index} starts at row {offset}, past the gather; stopping");
                self.halted_at = Some(index);
                return false;
            }
        }
        true
    }
}

/// A finished gather and how it was built.
#[derive(Debug, Clone)]
pub struct SynthesizedGather {
    /// Amplitudes, shape `(num_time_samples, num_traces)`
    pub data: Array2<f64>,
    pub summary: GatherSummary,
}

/// Build a ground-roll gather trace by trace.
///
/// # Arguments
/// * `params` - Gather parameters; validated before anything is allocated
///
/// # Returns
/// The gather, shape `(num_time_samples, num_traces)` regardless of how many
/// traces were skipped or cut off by the halt rule.
pub fn synthesize_gather(params: &SynthesisParameters) -> Result<SynthesizedGather, ParameterError> {
    params.validate()?;

    let mut data = Array2::<f64>::zeros((params.num_time_samples, params.num_traces));
    let mut summary = GatherSummary::default();

    for (index, column) in data.axis_iter_mut(Axis(1)).enumerate() {
        let outcome = Trace::new(params, index).render_into(column);
        if !summary.record(index, outcome) {
            break;
        }
    }

    Ok(SynthesizedGather { data, summary })
}

/// Build a gather with columns rendered in parallel.
///
/// Each column depends only on its own trace index, and a trace past the
/// bottom of the gather writes nothing, so the result is identical to
/// [`synthesize_gather`]. Outcomes are folded in index order afterwards so
/// the summary matches as well.
pub fn synthesize_gather_parallel(
    params: &SynthesisParameters,
) -> Result<SynthesizedGather, ParameterError> {
    params.validate()?;

    let mut data = Array2::<f64>::zeros((params.num_time_samples, params.num_traces));

    let outcomes: Vec<TraceOutcome> = data
        .axis_iter_mut(Axis(1))
        .into_par_iter()
        .enumerate()
        .map(|(index, column)| Trace::new(params, index).render_into(column))
        .collect();

    let mut summary = GatherSummary::default();
    for (index, outcome) in outcomes.into_iter().enumerate() {
        if !summary.record(index, outcome) {
            break;
        }
    }

    Ok(SynthesizedGather { data, summary })
}
