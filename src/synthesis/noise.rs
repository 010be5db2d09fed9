//! Noise generators

use std::f64::consts::PI;

use log::debug;
use rand::Rng;
use rustfft::{num_complex::Complex, FftPlanner};

use super::{check_samplerate, normalise_peak};
use crate::audio::{Sound, Span};
use crate::error::{Result, SoundError};

impl Sound {
    /// Generate white noise with samples uniformly distributed in [-1, 1)
    pub fn whitenoise(duration: impl Into<Span>, samplerate: u32) -> Result<Sound> {
        Sound::whitenoise_with_rng(duration, samplerate, &mut rand::thread_rng())
    }

    /// [`Sound::whitenoise`] drawing from a caller-supplied random source
    pub fn whitenoise_with_rng<R: Rng + ?Sized>(
        duration: impl Into<Span>,
        samplerate: u32,
        rng: &mut R,
    ) -> Result<Sound> {
        check_samplerate(samplerate)?;
        let n_samples = duration.into().in_nonzero_samples(samplerate)?;
        let samples = (0..n_samples).map(|_| rng.gen_range(-1.0_f64..1.0)).collect();
        Sound::from_mono(samples, samplerate)
    }

    /// Generate pink (1/f) noise
    pub fn pinknoise(duration: impl Into<Span>, samplerate: u32) -> Result<Sound> {
        Sound::powerlawnoise(1.0, duration, samplerate)
    }

    /// Generate noise whose power spectral density falls off as 1/f^alpha
    ///
    /// `alpha = 0` is white, `1` pink and `2` brown noise.
    pub fn powerlawnoise(alpha: f64, duration: impl Into<Span>, samplerate: u32) -> Result<Sound> {
        Sound::powerlawnoise_with_rng(alpha, duration, samplerate, &mut rand::thread_rng())
    }

    /// [`Sound::powerlawnoise`] drawing phases from a caller-supplied random source
    ///
    /// The spectrum is built directly: every positive-frequency bin gets
    /// magnitude `f^(-alpha/2)` and a random phase, DC is zero, and the
    /// Hermitian-symmetric spectrum is inverse transformed. The result is
    /// peak-normalised.
    pub fn powerlawnoise_with_rng<R: Rng + ?Sized>(
        alpha: f64,
        duration: impl Into<Span>,
        samplerate: u32,
        rng: &mut R,
    ) -> Result<Sound> {
        check_samplerate(samplerate)?;
        if !alpha.is_finite() {
            return Err(SoundError::invalid("alpha", alpha, "must be finite"));
        }
        let n_samples = duration.into().in_nonzero_samples(samplerate)?;

        let mut spectrum = vec![Complex::new(0.0, 0.0); n_samples];
        let half = n_samples / 2;
        for k in 1..=half {
            let freq = k as f64 * samplerate as f64 / n_samples as f64;
            let magnitude = freq.powf(-alpha / 2.0);
            if 2 * k == n_samples {
                // The Nyquist bin of an even-length transform must be real.
                spectrum[k] = Complex::new(magnitude, 0.0);
            } else {
                let bin = Complex::from_polar(magnitude, rng.gen_range(0.0..2.0 * PI));
                spectrum[k] = bin;
                spectrum[n_samples - k] = bin.conj();
            }
        }

        let mut planner = FftPlanner::<f64>::new();
        planner.plan_fft_inverse(n_samples).process(&mut spectrum);

        let mut samples: Vec<f64> = spectrum.iter().map(|c| c.re).collect();
        normalise_peak(&mut samples);

        debug!("Generated power-law noise alpha={}, {} samples", alpha, n_samples);
        Sound::from_mono(samples, samplerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_whitenoise_range_and_length() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Sound::whitenoise_with_rng(0.5, 8000, &mut rng).unwrap();
        assert_eq!(noise.n_samples(), 4000);
        assert!(noise.channel(0).iter().all(|s| (-1.0..1.0).contains(s)));
        assert!(noise.rms() > 0.5);
    }

    #[test]
    fn test_whitenoise_seeded_is_reproducible() {
        let a = Sound::whitenoise_with_rng(100usize, 8000, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = Sound::whitenoise_with_rng(100usize, 8000, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_powerlawnoise_is_normalised_and_zero_mean() {
        let mut rng = StdRng::seed_from_u64(11);
        let noise = Sound::powerlawnoise_with_rng(1.0, 4096usize, 44100, &mut rng).unwrap();
        assert!((noise.peak() - 1.0).abs() < 1e-12);
        let mean: f64 = noise.channel(0).iter().sum::<f64>() / 4096.0;
        assert!(mean.abs() < 1e-9);
    }

    #[test]
    fn test_powerlawnoise_odd_length() {
        let noise = Sound::powerlawnoise(0.5, 1001usize, 8000).unwrap();
        assert_eq!(noise.n_samples(), 1001);
        assert!(noise.channel(0).iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_powerlawnoise_rejects_nan_alpha() {
        assert!(Sound::powerlawnoise(f64::NAN, 100usize, 8000).is_err());
    }
}
