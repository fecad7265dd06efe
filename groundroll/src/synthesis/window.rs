//! Sine-edge plateau window applied to each chirp.

use ndarray::Array1;
use std::f64::consts::PI;

/// Symmetric taper: a sine ramp of `n_edge` samples on both ends, ones between.
///
/// The window is invalid when the two ramps would meet or overlap
/// (`n_edge >= len / 2`). Invalid windows are not an error; the trace that
/// requested one is skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeWindow {
    len: usize,
    n_edge: usize,
    win_scale: f64,
    dt: f64,
}

impl EdgeWindow {
    /// Describe a window of `len` samples.
    ///
    /// `n_edge = round(π / (2·dt·win_scale))`, rounding half to even.
    pub fn new(len: usize, win_scale: f64, dt: f64) -> Self {
        Self {
            len,
            n_edge: edge_length(win_scale, dt),
            win_scale,
            dt,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Samples in each tapered edge
    pub fn n_edge(&self) -> usize {
        self.n_edge
    }

    /// True when both ramps fit without touching (`2·n_edge < len`).
    pub fn is_valid(&self) -> bool {
        self.n_edge < self.len.div_ceil(2)
    }

    /// Materialize the window, or `None` if it is invalid.
    pub fn samples(&self) -> Option<Array1<f64>> {
        if !self.is_valid() {
            return None;
        }

        let mut window = Array1::<f64>::ones(self.len);
        for k in 0..self.n_edge {
            let edge = (k as f64 * self.dt * self.win_scale).sin();
            window[k] = edge;
            window[self.len - 1 - k] = edge;
        }
        Some(window)
    }
}

/// Edge length in samples for a given sharpness and sampling interval.
pub fn edge_length(win_scale: f64, dt: f64) -> usize {
    (PI / (2.0 * dt * win_scale)).round_ties_even() as usize
}
