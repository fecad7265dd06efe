//! Linear frequency sweep used as the dispersive ground-roll wavelet.
//!
//! Each trace gets its own chirp duration; longer durations stretch the same
//! frequency band over more samples, which mimics the frequency-dependent
//! propagation speed of surface waves.

use ndarray::Array1;
use std::f64::consts::PI;

/// Number of samples in `[0, duration)` at spacing `dt`.
///
/// Matches `ceil(duration / dt)`, the sample count of a half-open range.
pub fn chirp_len(duration: f64, dt: f64) -> usize {
    (duration / dt).ceil().max(0.0) as usize
}

/// Generate a linear chirp of the given duration.
///
/// Sample `k` is evaluated at the rescaled time `τ = k·dt / (2·duration)`:
///
/// `s[k] = sin(2π · (freq_low + (freq_high - freq_low)·τ) · τ)`
///
/// # Arguments
/// * `duration` - Chirp duration in seconds
/// * `freq_low` - Start frequency in Hz
/// * `freq_high` - End frequency in Hz
/// * `dt` - Sampling interval in seconds
///
/// # Returns
/// Array of `chirp_len(duration, dt)` samples
pub fn linear_chirp(duration: f64, freq_low: f64, freq_high: f64, dt: f64) -> Array1<f64> {
    let bandwidth = freq_high - freq_low;
    let scale = 2.0 * duration;

    Array1::from_shape_fn(chirp_len(duration, dt), |k| {
        let tau = (k as f64 * dt) / scale;
        let freq = freq_low + bandwidth * tau;
        (2.0 * PI * freq * tau).sin()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_chirp_len_exact_and_fractional() {
        assert_eq!(chirp_len(1.0, 0.25), 4);
        assert_eq!(chirp_len(1.1, 0.25), 5);
        assert_eq!(chirp_len(1.0, 1.0), 1);
    }

    #[test]
    fn test_chirp_starts_at_zero() {
        let chirp = linear_chirp(1.0, 5.0, 20.0, 0.002);
        assert_eq!(chirp.len(), 500);
        assert_eq!(chirp[0], 0.0);
    }

    #[test]
    fn test_chirp_matches_closed_form() {
        let (duration, f_lo, f_hi, dt) = (1.4, 3.0, 15.0, 0.003);
        let chirp = linear_chirp(duration, f_lo, f_hi, dt);

        for k in [1, 17, 200, chirp.len() - 1] {
            let tau = k as f64 * dt / (2.0 * duration);
            let expected = (2.0 * PI * (f_lo + (f_hi - f_lo) * tau) * tau).sin();
            assert_relative_eq!(chirp[k], expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_chirp_bounded() {
        let chirp = linear_chirp(3.0, 7.0, 25.0, 0.001);
        assert!(chirp.iter().all(|&s| (-1.0..=1.0).contains(&s)));
    }
}
