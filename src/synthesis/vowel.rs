//! Formant-synthesised vowels
//!
//! A glottal impulse train is passed through a cascade of band-pass biquads,
//! one per formant.

use std::f64::consts::PI;
use std::str::FromStr;

use log::debug;

use super::{check_frequency, check_samplerate, normalise_peak};
use crate::audio::{Sound, Span};
use crate::error::{Result, SoundError};

/// Default fundamental frequency of synthesised vowels (Hz)
pub const DEFAULT_VOWEL_F0: f64 = 120.0;

/// Bandwidths of the first three formants (Hz)
const FORMANT_BANDWIDTHS: [f64; 3] = [80.0, 90.0, 120.0];

/// Vowel identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vowel {
    /// /a/ as in "father"
    #[default]
    A,
    /// /ɛ/ as in "bed"
    E,
    /// /i/ as in "beet"
    I,
    /// /ɔ/ as in "bought"
    O,
    /// /u/ as in "boot"
    U,
    /// /æ/ as in "bat"
    Ae,
}

impl Vowel {
    /// First three formant frequencies in Hz (adult male averages)
    pub fn formants(&self) -> [f64; 3] {
        match self {
            Vowel::A => [730.0, 1090.0, 2440.0],
            Vowel::E => [530.0, 1840.0, 2480.0],
            Vowel::I => [270.0, 2290.0, 3010.0],
            Vowel::O => [570.0, 840.0, 2410.0],
            Vowel::U => [300.0, 870.0, 2240.0],
            Vowel::Ae => [660.0, 1720.0, 2410.0],
        }
    }
}

impl FromStr for Vowel {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Ok(Vowel::A),
            "e" => Ok(Vowel::E),
            "i" => Ok(Vowel::I),
            "o" => Ok(Vowel::O),
            "u" => Ok(Vowel::U),
            "ae" => Ok(Vowel::Ae),
            _ => Err(SoundError::UnknownName {
                kind: "vowel",
                name: s.to_string(),
            }),
        }
    }
}

/// Biquad filter coefficients, normalised by a0
#[derive(Debug, Clone, Copy, Default)]
struct BiquadCoeffs {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl BiquadCoeffs {
    /// Band-pass (0 dB peak gain) from the Audio EQ Cookbook
    fn resonator(samplerate: f64, frequency: f64, bandwidth: f64) -> Self {
        // Keep the centre below Nyquist for low samplerates
        let freq = frequency.min(samplerate * 0.45);
        let q = (freq / bandwidth).max(0.1);

        let w0 = 2.0 * PI * freq / samplerate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        BiquadCoeffs {
            b0: alpha / a0,
            b1: 0.0,
            b2: -alpha / a0,
            a1: -2.0 * cos_w0 / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Biquad filter state
#[derive(Debug, Clone, Copy, Default)]
struct BiquadState {
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadState {
    /// Direct Form I
    fn process(&mut self, input: f64, coeffs: &BiquadCoeffs) -> f64 {
        let output = coeffs.b0 * input + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
            - coeffs.a1 * self.y1
            - coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}

impl Sound {
    /// Synthesise the vowel /a/ at the default fundamental
    pub fn vowel(duration: impl Into<Span>, samplerate: u32) -> Result<Sound> {
        Sound::vowel_with(Vowel::default(), DEFAULT_VOWEL_F0, duration, samplerate)
    }

    /// Synthesise a vowel with a given fundamental frequency
    ///
    /// The output has exactly the requested length and is peak-normalised.
    pub fn vowel_with(
        vowel: Vowel,
        f0: f64,
        duration: impl Into<Span>,
        samplerate: u32,
    ) -> Result<Sound> {
        check_samplerate(samplerate)?;
        check_frequency("f0", f0)?;
        let n_samples = duration.into().in_nonzero_samples(samplerate)?;

        let period = ((samplerate as f64 / f0).round() as usize).max(1);
        let mut samples: Vec<f64> = (0..n_samples)
            .map(|i| if i % period == 0 { 1.0 } else { 0.0 })
            .collect();

        for (&formant, &bandwidth) in vowel.formants().iter().zip(FORMANT_BANDWIDTHS.iter()) {
            let coeffs = BiquadCoeffs::resonator(samplerate as f64, formant, bandwidth);
            let mut state = BiquadState::default();
            for sample in samples.iter_mut() {
                *sample = state.process(*sample, &coeffs);
            }
        }
        normalise_peak(&mut samples);

        debug!("Synthesised vowel {:?} at f0={} Hz, {} samples", vowel, f0, n_samples);
        Sound::from_mono(samples, samplerate)
    }
}
