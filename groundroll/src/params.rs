//! Physical parameters for a single ground-roll gather.
//!
//! The model is purely kinematic: a linear chirp whose duration grows with
//! trace index, placed at a travel-time offset set by the array spacing and
//! propagation velocity, and attenuated geometrically with distance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a parameter set violates the model invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{0} must be greater than zero")]
    ZeroCount(&'static str),
    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("freq_high ({high}) must exceed freq_low ({low})")]
    InvertedBand { low: f64, high: f64 },
    #[error("win_scale must be at least 2, got {0}")]
    WindowScaleTooSmall(f64),
}

/// Immutable description of one synthetic gather.
///
/// Counts are in samples/traces, `dx` in meters, `dt` in seconds, `velocity`
/// in m/s and frequencies in Hz. `Default` reproduces the reference
/// single-gather configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParameters {
    /// Number of traces (single side of the source point)
    pub num_traces: usize,
    /// Number of samples along the time axis
    pub num_time_samples: usize,
    /// Constant offset from the top of the gather, in samples
    pub time_shift: usize,
    /// Starting frequency of the dispersive chirp
    pub freq_low: f64,
    /// Ending frequency of the dispersive chirp
    pub freq_high: f64,
    /// Trace spacing
    pub dx: f64,
    /// Time sampling interval
    pub dt: f64,
    /// Ground-roll propagation velocity
    pub velocity: f64,
    /// Amplitude ratio applied once per trace of distance
    pub distance_degradation: f64,
    /// Sharpness of the window edges; larger is sharper
    pub win_scale: f64,
    /// Chirp duration growth per trace, in seconds
    pub duration_ratio: f64,
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self {
            num_traces: 100,
            num_time_samples: 1000,
            time_shift: 50,
            freq_low: 5.0,
            freq_high: 20.0,
            dx: 5.0,
            dt: 0.002,
            velocity: 100.0,
            distance_degradation: 0.92,
            win_scale: 4.0,
            duration_ratio: 0.04,
        }
    }
}

impl SynthesisParameters {
    /// Return a copy with a different gather shape.
    pub fn with_dimensions(mut self, num_traces: usize, num_time_samples: usize) -> Self {
        self.num_traces = num_traces;
        self.num_time_samples = num_time_samples;
        self
    }

    /// Check every model invariant.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.num_traces == 0 {
            return Err(ParameterError::ZeroCount("num_traces"));
        }
        if self.num_time_samples == 0 {
            return Err(ParameterError::ZeroCount("num_time_samples"));
        }

        let positive = [
            ("freq_low", self.freq_low),
            ("freq_high", self.freq_high),
            ("dx", self.dx),
            ("dt", self.dt),
            ("velocity", self.velocity),
            ("distance_degradation", self.distance_degradation),
            ("win_scale", self.win_scale),
            ("duration_ratio", self.duration_ratio),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParameterError::NonPositive { name, value });
            }
        }

        if self.freq_high <= self.freq_low {
            return Err(ParameterError::InvertedBand {
                low: self.freq_low,
                high: self.freq_high,
            });
        }

        if self.win_scale < 2.0 {
            return Err(ParameterError::WindowScaleTooSmall(self.win_scale));
        }

        Ok(())
    }

    /// Travel-time moveout per trace, in samples (reciprocal apparent velocity).
    pub fn samples_per_trace(&self) -> f64 {
        self.dx / (self.velocity * self.dt)
    }
}
