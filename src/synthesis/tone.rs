//! Pure tones and harmonic complexes

use std::f64::consts::PI;

use log::debug;

use super::{check_frequency, check_samplerate, normalise_peak};
use crate::audio::{Sound, Span};
use crate::error::{Result, SoundError};

/// Starting phase of each harmonic in a harmonic complex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HarmonicPhase {
    /// All harmonics start at phase zero
    #[default]
    Sine,
    /// All harmonics start at phase π/2
    Cosine,
    /// Schroeder phases `π·k·(k-1)/N`, giving a flat temporal envelope
    Schroeder,
}

impl HarmonicPhase {
    fn phase(&self, k: usize, n_harmonics: usize) -> f64 {
        match self {
            HarmonicPhase::Sine => 0.0,
            HarmonicPhase::Cosine => PI / 2.0,
            HarmonicPhase::Schroeder => PI * (k * (k - 1)) as f64 / n_harmonics as f64,
        }
    }
}

/// Frequency range and phases of a harmonic complex
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicOptions {
    /// Harmonics below this frequency are left out
    pub low_cutoff: f64,
    /// Harmonics at or above this frequency are left out (default: Nyquist)
    pub high_cutoff: Option<f64>,
    /// Phase model
    pub phase: HarmonicPhase,
}

impl Default for HarmonicOptions {
    fn default() -> Self {
        Self {
            low_cutoff: 0.0,
            high_cutoff: None,
            phase: HarmonicPhase::Sine,
        }
    }
}

impl Sound {
    /// Generate a unit-amplitude sine tone
    ///
    /// # Arguments
    /// * `frequency` - Frequency of the tone in Hz
    /// * `duration` - Samples (`usize`) or seconds (`f64`)
    /// * `samplerate` - Sample rate in Hz
    pub fn tone(frequency: f64, duration: impl Into<Span>, samplerate: u32) -> Result<Sound> {
        check_samplerate(samplerate)?;
        check_frequency("frequency", frequency)?;
        let n_samples = duration.into().in_nonzero_samples(samplerate)?;

        let samples = (0..n_samples)
            .map(|i| {
                let t = i as f64 / samplerate as f64;
                (2.0 * PI * frequency * t).sin()
            })
            .collect();

        debug!("Generated {} Hz tone, {} samples at {} Hz", frequency, n_samples, samplerate);
        Sound::from_mono(samples, samplerate)
    }

    /// Generate a harmonic complex with every harmonic of `f0` below Nyquist
    pub fn harmoniccomplex(f0: f64, duration: impl Into<Span>, samplerate: u32) -> Result<Sound> {
        Sound::harmoniccomplex_with(f0, duration, samplerate, &HarmonicOptions::default())
    }

    /// Generate a harmonic complex with explicit cutoffs and phases
    ///
    /// All harmonics have equal amplitude; the sum is peak-normalised.
    ///
    /// # Errors
    /// `InvalidParameter` if `f0` is not positive or no harmonic falls inside
    /// the cutoff range.
    pub fn harmoniccomplex_with(
        f0: f64,
        duration: impl Into<Span>,
        samplerate: u32,
        options: &HarmonicOptions,
    ) -> Result<Sound> {
        check_samplerate(samplerate)?;
        check_frequency("f0", f0)?;
        let n_samples = duration.into().in_nonzero_samples(samplerate)?;

        let nyquist = samplerate as f64 / 2.0;
        let high = options.high_cutoff.map_or(nyquist, |h| h.min(nyquist));
        let harmonics: Vec<f64> = (1..)
            .map(|k| k as f64 * f0)
            .take_while(|&f| f < high)
            .filter(|&f| f >= options.low_cutoff)
            .collect();
        if harmonics.is_empty() {
            return Err(SoundError::invalid(
                "f0",
                f0,
                "no harmonic falls inside the cutoff range",
            ));
        }

        let mut samples = vec![0.0; n_samples];
        for (k, &freq) in harmonics.iter().enumerate() {
            let phase = options.phase.phase(k + 1, harmonics.len());
            let w = 2.0 * PI * freq / samplerate as f64;
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample += (w * i as f64 + phase).sin();
            }
        }
        normalise_peak(&mut samples);

        debug!(
            "Generated harmonic complex f0={} Hz with {} harmonics",
            f0,
            harmonics.len()
        );
        Sound::from_mono(samples, samplerate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tone_properties() {
        let tone = Sound::tone(440.0, 1.0, 44100).unwrap();
        assert_eq!(tone.n_samples(), 44100);
        assert_eq!(tone.n_channels(), 1);
        assert_abs_diff_eq!(tone.peak(), 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(tone.rms(), std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-3);
        assert_eq!(tone.channel(0)[0], 0.0);
    }

    #[test]
    fn test_tone_rejects_bad_parameters() {
        assert!(Sound::tone(0.0, 100usize, 44100).is_err());
        assert!(Sound::tone(-5.0, 100usize, 44100).is_err());
        assert!(Sound::tone(440.0, 0usize, 44100).is_err());
        assert!(Sound::tone(440.0, 100usize, 0).is_err());
    }

    #[test]
    fn test_harmonic_complex_is_normalised() {
        let sound = Sound::harmoniccomplex(500.0, 0.1, 44100).unwrap();
        assert_eq!(sound.n_samples(), 4410);
        assert_abs_diff_eq!(sound.peak(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_harmonic_cutoffs() {
        let options = HarmonicOptions {
            low_cutoff: 30_000.0,
            ..HarmonicOptions::default()
        };
        assert!(Sound::harmoniccomplex_with(500.0, 100usize, 44100, &options).is_err());
        assert!(Sound::harmoniccomplex(30_000.0, 100usize, 44100).is_err());
    }

    #[test]
    fn test_schroeder_phase_lowers_crest_factor() {
        let sine = Sound::harmoniccomplex(200.0, 0.2, 16000).unwrap();
        let schroeder = Sound::harmoniccomplex_with(
            200.0,
            0.2,
            16000,
            &HarmonicOptions {
                phase: HarmonicPhase::Schroeder,
                ..HarmonicOptions::default()
            },
        )
        .unwrap();
        // Both are peak-normalised, so a flatter envelope shows up as more RMS.
        assert!(schroeder.rms() > sine.rms());
    }
}
