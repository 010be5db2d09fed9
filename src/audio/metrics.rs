//! Level measurements
//!
//! Plain slice helpers shared by [`Sound`](crate::audio::Sound) and the
//! analysis module.

/// Reference amplitude for sound levels (20 µPa convention)
///
/// With this reference a full-scale sine reads about 91 dB.
pub const LEVEL_REFERENCE: f64 = 2e-5;

/// Convert linear amplitude to decibels
///
/// Returns `f64::NEG_INFINITY` for zero or negative input.
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    if linear <= 0.0 {
        f64::NEG_INFINITY
    } else {
        20.0 * linear.log10()
    }
}

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Calculate RMS (Root Mean Square) of samples
pub fn calculate_rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f64).sqrt()
}

/// Calculate peak (maximum absolute value) of samples
pub fn calculate_peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0_f64, f64::max)
}

/// Level in dB of an RMS amplitude relative to `reference`
#[inline]
pub fn level_db(rms: f64, reference: f64) -> f64 {
    linear_to_db(rms / reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_db_conversion() {
        assert_abs_diff_eq!(linear_to_db(1.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(linear_to_db(0.1), -20.0, epsilon = 1e-9);
        assert!(linear_to_db(0.0).is_infinite());
        assert_abs_diff_eq!(db_to_linear(-6.0206), 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_rms_and_peak() {
        let samples = [0.5, -0.5, 0.5, -0.5];
        assert_abs_diff_eq!(calculate_rms(&samples), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(calculate_peak(&[0.1, -0.9, 0.3]), 0.9, epsilon = 1e-12);
        assert_eq!(calculate_rms(&[]), 0.0);
    }

    #[test]
    fn test_full_scale_sine_level() {
        let samples: Vec<f64> = (0..44100)
            .map(|i| (2.0 * std::f64::consts::PI * 1000.0 * i as f64 / 44100.0).sin())
            .collect();
        let level = level_db(calculate_rms(&samples), LEVEL_REFERENCE);
        assert_abs_diff_eq!(level, 90.97, epsilon = 0.01);
    }
}
