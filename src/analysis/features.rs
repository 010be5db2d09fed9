//! Scalar spectral features

use std::str::FromStr;

use crate::analysis::spectrum::Spectrum;
use crate::audio::Sound;
use crate::error::{Result, SoundError};

/// Default energy fraction for [`SpectralFeature::Rolloff`]
pub const DEFAULT_ROLLOFF: f64 = 0.85;

/// A feature derived from the magnitude spectrum
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpectralFeature {
    /// Magnitude-weighted mean frequency (Hz)
    Centroid,
    /// Geometric over arithmetic mean of magnitudes, 0 (tonal) to 1 (noise-like)
    Flatness,
    /// Frequency (Hz) below which the given fraction of the energy lies
    Rolloff(f64),
}

impl FromStr for SpectralFeature {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "centroid" => Ok(SpectralFeature::Centroid),
            "flatness" => Ok(SpectralFeature::Flatness),
            "rolloff" => Ok(SpectralFeature::Rolloff(DEFAULT_ROLLOFF)),
            _ => Err(SoundError::UnknownName {
                kind: "spectral feature",
                name: s.to_string(),
            }),
        }
    }
}

impl Spectrum {
    /// Evaluate a feature for every channel
    ///
    /// # Errors
    /// `InvalidParameter` for a rolloff fraction outside (0, 1].
    pub fn feature(&self, feature: SpectralFeature) -> Result<Vec<f64>> {
        if let SpectralFeature::Rolloff(fraction) = feature {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(SoundError::invalid(
                    "rolloff",
                    fraction,
                    "must be a fraction in (0, 1]",
                ));
            }
        }
        Ok(self
            .magnitudes
            .iter()
            .map(|mags| match feature {
                SpectralFeature::Centroid => centroid(&self.freqs, mags),
                SpectralFeature::Flatness => flatness(mags),
                SpectralFeature::Rolloff(fraction) => rolloff(&self.freqs, mags, fraction),
            })
            .collect())
    }
}

impl Sound {
    /// Spectral feature of each channel
    pub fn spectral_feature(&self, feature: SpectralFeature) -> Result<Vec<f64>> {
        self.spectrum().feature(feature)
    }
}

fn centroid(freqs: &[f64], mags: &[f64]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut magnitude_sum = 0.0;
    for (&freq, &mag) in freqs.iter().zip(mags) {
        weighted_sum += freq * mag;
        magnitude_sum += mag;
    }
    if magnitude_sum > 0.0 {
        weighted_sum / magnitude_sum
    } else {
        0.0
    }
}

fn flatness(mags: &[f64]) -> f64 {
    if mags.is_empty() {
        return 0.0;
    }
    let n = mags.len() as f64;
    let log_sum: f64 = mags.iter().map(|&m| m.max(1e-20).ln()).sum();
    let geometric_mean = (log_sum / n).exp();
    let arithmetic_mean = mags.iter().sum::<f64>() / n;
    if arithmetic_mean > 1e-20 {
        geometric_mean / arithmetic_mean
    } else {
        0.0
    }
}

fn rolloff(freqs: &[f64], mags: &[f64], fraction: f64) -> f64 {
    let total_energy: f64 = mags.iter().map(|m| m * m).sum();
    let threshold = total_energy * fraction;
    let mut cumulative = 0.0;
    for (&freq, &mag) in freqs.iter().zip(mags) {
        cumulative += mag * mag;
        if cumulative >= threshold {
            return freq;
        }
    }
    freqs.last().copied().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_centroid_of_pure_tone() {
        let tone = Sound::tone(250.0, 1000usize, 1000).unwrap();
        let centroid = tone.spectral_feature(SpectralFeature::Centroid).unwrap();
        assert_abs_diff_eq!(centroid[0], 250.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flatness_noise_vs_tone() {
        let mut rng = StdRng::seed_from_u64(5);
        let noise = Sound::whitenoise_with_rng(4096usize, 8000, &mut rng).unwrap();
        let tone = Sound::tone(1000.0, 4096usize, 8000).unwrap();
        let noise_flatness = noise.spectral_feature(SpectralFeature::Flatness).unwrap()[0];
        let tone_flatness = tone.spectral_feature(SpectralFeature::Flatness).unwrap()[0];
        assert!(noise_flatness > 0.5);
        assert!(tone_flatness < 0.1);
    }

    #[test]
    fn test_rolloff() {
        let tone = Sound::tone(300.0, 1000usize, 1000).unwrap();
        let rolloff = tone.spectral_feature(SpectralFeature::Rolloff(0.85)).unwrap();
        assert_eq!(rolloff[0], 300.0);
        assert!(tone.spectral_feature(SpectralFeature::Rolloff(0.0)).is_err());
        assert!(tone.spectral_feature(SpectralFeature::Rolloff(1.5)).is_err());
    }

    #[test]
    fn test_parse_feature_names() {
        assert_eq!(
            "Centroid".parse::<SpectralFeature>().unwrap(),
            SpectralFeature::Centroid
        );
        assert_eq!(
            "rolloff".parse::<SpectralFeature>().unwrap(),
            SpectralFeature::Rolloff(DEFAULT_ROLLOFF)
        );
        assert!("brightness".parse::<SpectralFeature>().is_err());
    }
}
