//! Single-trace assembly: chirp × window, moveout placement and decay.
//!
//! Everything about trace `i` is a pure function of `i` and the gather
//! parameters, so traces can be rendered in any order.

use ndarray::{s, Array1, ArrayView1, ArrayViewMut1};

use crate::params::SynthesisParameters;
use crate::synthesis::chirp::{chirp_len, linear_chirp};
use crate::synthesis::window::EdgeWindow;

/// Result of writing a signal into a gather column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The whole signal fit below the offset
    Full,
    /// Only the first `kept` samples fit before the bottom of the gather
    Truncated { kept: usize },
}

/// What happened to one trace during a gather build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    Placed { offset: usize },
    Truncated { offset: usize, kept: usize },
    /// Window edges overlapped; the column was left at zero
    SkippedWindow { n_edge: usize, len: usize },
    /// Offset beyond the gather; the build stops here
    Halted { offset: usize },
}

/// Write `signal * decay` into `column` starting at row `offset`, clipping at
/// the bottom edge.
///
/// # Arguments
/// * `column` - Destination gather column (length = time samples)
/// * `signal` - Windowed chirp for this trace
/// * `offset` - First row to write
/// * `decay` - Amplitude multiplier for this trace
///
/// # Panics
/// If `offset` lies past the bottom of `column`; such a trace halts the build
/// and must not be placed.
pub fn place_signal(
    mut column: ArrayViewMut1<f64>,
    signal: ArrayView1<f64>,
    offset: usize,
    decay: f64,
) -> Placement {
    let rows = column.len();
    assert!(
        offset <= rows,
        "offset {offset} is past the bottom of a {rows}-row column"
    );

    let available = rows - offset;
    if signal.len() > available {
        column
            .slice_mut(s![offset..])
            .zip_mut_with(&signal.slice(s![..available]), |dst, &src| {
                *dst = src * decay
            });
        Placement::Truncated { kept: available }
    } else {
        column
            .slice_mut(s![offset..offset + signal.len()])
            .zip_mut_with(&signal, |dst, &src| *dst = src * decay);
        Placement::Full
    }
}

/// Derived view of trace `index` within a gather.
#[derive(Debug, Clone, Copy)]
pub struct Trace<'a> {
    params: &'a SynthesisParameters,
    index: usize,
}

impl<'a> Trace<'a> {
    pub fn new(params: &'a SynthesisParameters, index: usize) -> Self {
        Self { params, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Chirp duration in seconds: `1 + i · duration_ratio`
    pub fn duration(&self) -> f64 {
        1.0 + self.index as f64 * self.params.duration_ratio
    }

    /// Number of chirp (and window) samples
    pub fn sample_count(&self) -> usize {
        chirp_len(self.duration(), self.params.dt)
    }

    /// First gather row of this trace: `round(i · dx / (v · dt)) + time_shift`
    ///
    /// Saturates at `usize::MAX`, which is always past the gather.
    pub fn offset(&self) -> usize {
        let moveout = (self.index as f64 * self.params.samples_per_trace()).round_ties_even();
        (moveout as usize).saturating_add(self.params.time_shift)
    }

    /// Geometric amplitude decay: `distance_degradation ^ i`
    pub fn decay(&self) -> f64 {
        self.params.distance_degradation.powf(self.index as f64)
    }

    pub fn window(&self) -> EdgeWindow {
        EdgeWindow::new(self.sample_count(), self.params.win_scale, self.params.dt)
    }

    /// True when the trace starts below the bottom of the gather.
    pub fn halts(&self) -> bool {
        self.offset() > self.params.num_time_samples
    }

    /// Windowed chirp, or `None` when the window is invalid.
    pub fn signal(&self) -> Option<Array1<f64>> {
        let window = self.window().samples()?;
        let chirp = linear_chirp(
            self.duration(),
            self.params.freq_low,
            self.params.freq_high,
            self.params.dt,
        );
        Some(chirp * window)
    }

    /// Render this trace into its gather column.
    ///
    /// Window validity is checked first, then the halt condition, so a trace
    /// with an invalid window is reported as skipped even when it would also
    /// overflow.
    pub fn render_into(&self, column: ArrayViewMut1<f64>) -> TraceOutcome {
        let window = self.window();
        if !window.is_valid() {
            return TraceOutcome::SkippedWindow {
                n_edge: window.n_edge(),
                len: window.len(),
            };
        }

        let offset = self.offset();
        if self.halts() {
            return TraceOutcome::Halted { offset };
        }

        let Some(signal) = self.signal() else {
            return TraceOutcome::SkippedWindow {
                n_edge: window.n_edge(),
                len: window.len(),
            };
        };

        match place_signal(column, signal.view(), offset, self.decay()) {
            Placement::Full => TraceOutcome::Placed { offset },
            Placement::Truncated { kept } => TraceOutcome::Truncated { offset, kept },
        }
    }
}
