//! Sequencing and crossfading

use std::f64::consts::FRAC_PI_2;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::audio::{Sound, Span};
use crate::error::{Result, SoundError};

/// Gain curve used across a crossfade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeShape {
    /// Gains `1 - x` and `x`; constant amplitude sum
    #[default]
    Linear,
    /// Gains `cos(xπ/2)` and `sin(xπ/2)`; constant power sum
    EqualPower,
}

impl FadeShape {
    /// (outgoing, incoming) gains at fade position `x` in [0, 1]
    #[inline]
    fn gains(&self, x: f64) -> (f64, f64) {
        match self {
            FadeShape::Linear => (1.0 - x, x),
            FadeShape::EqualPower => ((x * FRAC_PI_2).cos(), (x * FRAC_PI_2).sin()),
        }
    }
}

impl Sound {
    /// Join sounds end to end
    ///
    /// # Errors
    /// * `InvalidParameter` - no sounds given
    /// * `ShapeMismatch` - samplerates or channel counts differ
    pub fn sequence<'a>(sounds: impl IntoIterator<Item = &'a Sound>) -> Result<Sound> {
        let sounds: Vec<&Sound> = sounds.into_iter().collect();
        let first = check_compatible(&sounds)?;

        let total: usize = sounds.iter().map(|s| s.n_samples()).sum();
        let mut channels: Vec<Vec<f64>> = (0..first.n_channels())
            .map(|_| Vec::with_capacity(total))
            .collect();
        for sound in &sounds {
            for (out, ch) in channels.iter_mut().zip(sound.channels()) {
                out.extend_from_slice(ch);
            }
        }

        debug!("Sequenced {} sounds into {} samples", sounds.len(), total);
        Ok(Sound::from_parts(channels, first.samplerate()))
    }

    /// Join sounds with a linear crossfade of `overlap` at every boundary
    pub fn crossfade<'a>(
        sounds: impl IntoIterator<Item = &'a Sound>,
        overlap: impl Into<Span>,
    ) -> Result<Sound> {
        Sound::crossfade_with(sounds, overlap, FadeShape::default())
    }

    /// Join sounds, overlapping consecutive ones by `overlap` samples
    ///
    /// An overlap in seconds is truncated to whole samples. The result has
    /// `Σ n_i - (k - 1) · overlap` samples. With a zero overlap the result is
    /// identical to [`Sound::sequence`].
    ///
    /// # Errors
    /// * `InvalidParameter` - no sounds, or a sound too short for its fades
    ///   (the first and last need `overlap` samples, the others twice that)
    /// * `ShapeMismatch` - samplerates or channel counts differ
    pub fn crossfade_with<'a>(
        sounds: impl IntoIterator<Item = &'a Sound>,
        overlap: impl Into<Span>,
        shape: FadeShape,
    ) -> Result<Sound> {
        let sounds: Vec<&Sound> = sounds.into_iter().collect();
        let first = check_compatible(&sounds)?;
        let overlap = overlap.into().in_samples_floor(first.samplerate())?;

        let last = sounds.len() - 1;
        for (index, sound) in sounds.iter().enumerate() {
            let fades = usize::from(index > 0) + usize::from(index < last);
            if sound.n_samples() < fades * overlap {
                return Err(SoundError::invalid(
                    "overlap",
                    overlap as f64,
                    "longer than a sound can fade in and out",
                ));
            }
        }

        let total = sounds.iter().map(|s| s.n_samples()).sum::<usize>() - last * overlap;
        let mut channels: Vec<Vec<f64>> = first
            .channels()
            .iter()
            .map(|ch| {
                let mut out = Vec::with_capacity(total);
                out.extend_from_slice(ch);
                out
            })
            .collect();

        for sound in &sounds[1..] {
            for (out, incoming) in channels.iter_mut().zip(sound.channels()) {
                let start = out.len() - overlap;
                for i in 0..overlap {
                    let x = (i as f64 + 0.5) / overlap as f64;
                    let (gain_out, gain_in) = shape.gains(x);
                    out[start + i] = out[start + i] * gain_out + incoming[i] * gain_in;
                }
                out.extend_from_slice(&incoming[overlap..]);
            }
        }

        debug!(
            "Crossfaded {} sounds with {} samples overlap ({:?})",
            sounds.len(),
            overlap,
            shape
        );
        Ok(Sound::from_parts(channels, first.samplerate()))
    }
}

/// Check that a list of sounds can be joined, returning the first
fn check_compatible<'a>(sounds: &[&'a Sound]) -> Result<&'a Sound> {
    let Some(&first) = sounds.first() else {
        return Err(SoundError::invalid("sounds", 0.0, "at least one sound is required"));
    };
    for (index, sound) in sounds.iter().enumerate().skip(1) {
        if sound.samplerate() != first.samplerate() {
            return Err(SoundError::shape(format!(
                "sound {} has samplerate {} Hz, sound 0 has {} Hz",
                index,
                sound.samplerate(),
                first.samplerate()
            )));
        }
        if sound.n_channels() != first.n_channels() {
            return Err(SoundError::shape(format!(
                "sound {} has {} channels, sound 0 has {}",
                index,
                sound.n_channels(),
                first.n_channels()
            )));
        }
    }
    Ok(first)
}
