//! Signal generators
//!
//! Every generator is an associated function on [`Sound`](crate::Sound)
//! that builds a new mono sound from its parameters alone.

mod noise;
mod tone;
mod vowel;

pub use tone::{HarmonicOptions, HarmonicPhase};
pub use vowel::{Vowel, DEFAULT_VOWEL_F0};

use crate::error::{Result, SoundError};

pub(crate) fn check_samplerate(samplerate: u32) -> Result<()> {
    if samplerate == 0 {
        return Err(SoundError::invalid("samplerate", 0.0, "must be positive"));
    }
    Ok(())
}

pub(crate) fn check_frequency(param: &'static str, frequency: f64) -> Result<()> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(SoundError::invalid(param, frequency, "must be a positive frequency"));
    }
    Ok(())
}

/// Divide by the largest absolute value, leaving silence untouched
pub(crate) fn normalise_peak(samples: &mut [f64]) {
    let peak = crate::audio::metrics::calculate_peak(samples);
    if peak > 0.0 {
        for sample in samples.iter_mut() {
            *sample /= peak;
        }
    }
}
