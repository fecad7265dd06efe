//! Parameter lists and their Cartesian product.
//!
//! The product is never materialized. A combination is identified by its
//! enumeration position and decoded on demand as a mixed-radix number whose
//! least significant digit is the innermost list (`duration_ratio`), which
//! reproduces the order of eleven nested loops and lets the index space be
//! split across workers.

use serde::{Deserialize, Serialize};

use crate::params::SynthesisParameters;
use crate::sweep::SweepError;

/// One value list per gather parameter, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterRanges {
    pub num_traces: Vec<usize>,
    pub num_time_samples: Vec<usize>,
    pub time_shift: Vec<usize>,
    pub freq_low: Vec<f64>,
    pub freq_high: Vec<f64>,
    pub dx: Vec<f64>,
    pub dt: Vec<f64>,
    pub velocity: Vec<f64>,
    pub distance_degradation: Vec<f64>,
    pub win_scale: Vec<f64>,
    pub duration_ratio: Vec<f64>,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            num_traces: vec![50, 100, 150],
            num_time_samples: vec![500, 1000, 1500],
            time_shift: vec![30, 50, 70],
            freq_low: vec![3.0, 5.0, 7.0],
            freq_high: vec![15.0, 20.0, 25.0],
            dx: vec![3.0, 5.0, 7.0],
            dt: vec![0.001, 0.002, 0.003],
            velocity: vec![80.0, 100.0, 120.0],
            distance_degradation: vec![0.9, 0.92, 0.94],
            win_scale: vec![2.0, 4.0, 6.0],
            duration_ratio: vec![0.02, 0.04, 0.06],
        }
    }
}

impl ParameterRanges {
    /// List names and lengths in nesting order.
    fn dimensions(&self) -> [(&'static str, usize); 11] {
        [
            ("num_traces", self.num_traces.len()),
            ("num_time_samples", self.num_time_samples.len()),
            ("time_shift", self.time_shift.len()),
            ("freq_low", self.freq_low.len()),
            ("freq_high", self.freq_high.len()),
            ("dx", self.dx.len()),
            ("dt", self.dt.len()),
            ("velocity", self.velocity.len()),
            ("distance_degradation", self.distance_degradation.len()),
            ("win_scale", self.win_scale.len()),
            ("duration_ratio", self.duration_ratio.len()),
        ]
    }

    /// Every list must hold at least one value.
    pub fn validate(&self) -> Result<(), SweepError> {
        match self.dimensions().iter().find(|(_, len)| *len == 0) {
            Some((name, _)) => Err(SweepError::EmptyRange(name)),
            None => Ok(()),
        }
    }

    /// Size of the Cartesian product.
    pub fn combination_count(&self) -> Result<usize, SweepError> {
        self.dimensions()
            .iter()
            .try_fold(1usize, |acc, (_, len)| acc.checked_mul(*len))
            .ok_or(SweepError::TooManyCombinations)
    }

    /// Decode the combination at enumeration `position`.
    ///
    /// # Panics
    /// If `position` is not below [`ParameterRanges::combination_count`].
    pub fn combination(&self, position: usize) -> SynthesisParameters {
        let mut remainder = position;
        let mut digit = |len: usize| {
            let value = remainder % len;
            remainder /= len;
            value
        };

        let duration_ratio = self.duration_ratio[digit(self.duration_ratio.len())];
        let win_scale = self.win_scale[digit(self.win_scale.len())];
        let distance_degradation =
            self.distance_degradation[digit(self.distance_degradation.len())];
        let velocity = self.velocity[digit(self.velocity.len())];
        let dt = self.dt[digit(self.dt.len())];
        let dx = self.dx[digit(self.dx.len())];
        let freq_high = self.freq_high[digit(self.freq_high.len())];
        let freq_low = self.freq_low[digit(self.freq_low.len())];
        let time_shift = self.time_shift[digit(self.time_shift.len())];
        let num_time_samples = self.num_time_samples[digit(self.num_time_samples.len())];
        let num_traces = self.num_traces[digit(self.num_traces.len())];

        assert!(
            remainder == 0,
            "Combination position {position} is outside the parameter space"
        );

        SynthesisParameters {
            num_traces,
            num_time_samples,
            time_shift,
            freq_low,
            freq_high,
            dx,
            dt,
            velocity,
            distance_degradation,
            win_scale,
            duration_ratio,
        }
    }

    /// Lazily enumerate `(position, parameters)` in nesting order.
    pub fn combinations(&self) -> Result<Combinations<'_>, SweepError> {
        self.validate()?;
        Ok(Combinations {
            ranges: self,
            next: 0,
            end: self.combination_count()?,
        })
    }
}

/// Iterator over the parameter product; see [`ParameterRanges::combinations`].
#[derive(Debug, Clone)]
pub struct Combinations<'a> {
    ranges: &'a ParameterRanges,
    next: usize,
    end: usize,
}

impl Iterator for Combinations<'_> {
    type Item = (usize, SynthesisParameters);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let position = self.next;
        self.next += 1;
        Some((position, self.ranges.combination(position)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}
