//! Sound implementation
//!
//! `Sound` is the core value type: a time × channel matrix of `f64` samples
//! tagged with a samplerate.

use log::debug;

use crate::audio::metrics::{calculate_peak, calculate_rms, db_to_linear, level_db, LEVEL_REFERENCE};
use crate::audio::span::Span;
use crate::error::{Result, SoundError};

/// Multi-channel sample data with a samplerate
///
/// Stores audio as non-interleaved 64-bit floating point samples, one
/// `Vec<f64>` per channel. Every channel has the same length and there is
/// always at least one channel.
///
/// Two sounds are equal when their samples are element-wise equal and their
/// samplerates match.
///
/// # Example
/// ```
/// use soundlab::Sound;
///
/// let sound = Sound::from_frames(vec![vec![1.0, 0.5]; 10], 10).unwrap();
/// assert_eq!(sound.n_channels(), 2);
/// assert_eq!(sound.n_samples(), 10);
/// assert_eq!(sound.duration(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    /// Sample data: outer Vec is channels, inner Vec is samples
    channels: Vec<Vec<f64>>,
    /// Sample rate in Hz
    samplerate: u32,
}

impl Sound {
    /// Create a sound from per-channel sample vectors
    ///
    /// # Errors
    /// * `ShapeMismatch` - no channels, or channels of differing length
    /// * `InvalidParameter` - samplerate of zero
    pub fn new(channels: Vec<Vec<f64>>, samplerate: u32) -> Result<Self> {
        if samplerate == 0 {
            return Err(SoundError::invalid("samplerate", 0.0, "must be positive"));
        }
        let Some(first) = channels.first() else {
            return Err(SoundError::shape("a sound needs at least one channel"));
        };
        let n_samples = first.len();
        if let Some((index, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != n_samples)
        {
            return Err(SoundError::shape(format!(
                "channel {} has {} samples, channel 0 has {}",
                index,
                ch.len(),
                n_samples
            )));
        }
        Ok(Self {
            channels,
            samplerate,
        })
    }

    /// Create a single-channel sound
    pub fn from_mono(samples: Vec<f64>, samplerate: u32) -> Result<Self> {
        Self::new(vec![samples], samplerate)
    }

    /// Create a sound from rows of frames (rows = time, columns = channels)
    pub fn from_frames(frames: Vec<Vec<f64>>, samplerate: u32) -> Result<Self> {
        let channels = crate::audio::source::Array::Frames(frames).into_channels()?;
        Self::new(channels, samplerate)
    }

    /// Create a silent sound
    pub fn silence(duration: impl Into<Span>, samplerate: u32) -> Result<Self> {
        let n_samples = duration.into().in_nonzero_samples(samplerate)?;
        Self::from_mono(vec![0.0; n_samples], samplerate)
    }

    // ------------------------------------------------------------------------
    // Shape
    // ------------------------------------------------------------------------

    /// Sample rate in Hz
    #[inline]
    pub fn samplerate(&self) -> u32 {
        self.samplerate
    }

    /// Number of channels
    #[inline]
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.channels.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Duration in seconds
    #[inline]
    pub fn duration(&self) -> f64 {
        self.n_samples() as f64 / self.samplerate as f64
    }

    /// Timestamp of sample `index`
    #[inline]
    pub fn time(&self, index: usize) -> f64 {
        index as f64 / self.samplerate as f64
    }

    /// Timestamps of all samples (`times[i] = i / samplerate`)
    pub fn times(&self) -> Vec<f64> {
        (0..self.n_samples()).map(|i| self.time(i)).collect()
    }

    // ------------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------------

    /// Samples of one channel
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f64] {
        &self.channels[index]
    }

    /// All channels
    #[inline]
    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// Consume the sound and return its channels
    pub fn into_channels(self) -> Vec<Vec<f64>> {
        self.channels
    }

    /// Get a sample at the specified frame and channel
    #[inline]
    pub fn sample(&self, index: usize, channel: usize) -> Option<f64> {
        self.channels
            .get(channel)
            .and_then(|ch| ch.get(index).copied())
    }

    /// All channel values at one time index
    pub fn frame(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.n_samples() {
            return None;
        }
        Some(self.channels.iter().map(|ch| ch[index]).collect())
    }

    /// Data as rows of frames (rows = time, columns = channels)
    pub fn to_frames(&self) -> Vec<Vec<f64>> {
        (0..self.n_samples())
            .map(|i| self.channels.iter().map(|ch| ch[i]).collect())
            .collect()
    }

    /// A copy of the samples between `start` and `end` (exclusive)
    ///
    /// # Errors
    /// `InvalidParameter` if the range is empty or runs past the end.
    pub fn slice(&self, start: usize, end: usize) -> Result<Sound> {
        if start >= end {
            return Err(SoundError::invalid("start", start as f64, "must be before end"));
        }
        if end > self.n_samples() {
            return Err(SoundError::invalid("end", end as f64, "runs past the end of the sound"));
        }
        let channels = self
            .channels
            .iter()
            .map(|ch| ch[start..end].to_vec())
            .collect();
        Ok(Self {
            channels,
            samplerate: self.samplerate,
        })
    }

    /// A sound with the first channel repeated `n` times
    pub fn copy_channels(&self, n: usize) -> Result<Sound> {
        if n == 0 {
            return Err(SoundError::invalid("channels", 0.0, "must be at least one"));
        }
        Ok(Self {
            channels: vec![self.channels[0].clone(); n],
            samplerate: self.samplerate,
        })
    }

    // ------------------------------------------------------------------------
    // Controlled mutation
    // ------------------------------------------------------------------------

    /// Replace the samples, keeping the shape
    ///
    /// # Errors
    /// `ShapeMismatch` if the new data has a different channel count or
    /// length; the sound is left untouched.
    pub fn set_data(&mut self, channels: Vec<Vec<f64>>) -> Result<()> {
        if channels.len() != self.n_channels() {
            return Err(SoundError::shape(format!(
                "expected {} channels, got {}",
                self.n_channels(),
                channels.len()
            )));
        }
        if let Some(ch) = channels.iter().find(|ch| ch.len() != self.n_samples()) {
            return Err(SoundError::shape(format!(
                "expected {} samples per channel, got {}",
                self.n_samples(),
                ch.len()
            )));
        }
        self.channels = channels;
        Ok(())
    }

    /// Apply a function to every sample in place
    pub fn map_samples(&mut self, mut f: impl FnMut(f64) -> f64) {
        for channel in &mut self.channels {
            for sample in channel.iter_mut() {
                *sample = f(*sample);
            }
        }
    }

    /// Apply gain in linear scale
    pub fn apply_gain(&mut self, gain: f64) {
        self.map_samples(|s| s * gain);
    }

    /// A copy scaled by a linear gain
    pub fn with_gain(&self, gain: f64) -> Sound {
        let mut out = self.clone();
        out.apply_gain(gain);
        out
    }

    /// Scale so the largest absolute sample is 1.0
    ///
    /// Silent sounds are left unchanged. Normalising twice is a no-op.
    pub fn normalise(&mut self) {
        let peak = self.peak();
        if peak > 0.0 && peak != 1.0 {
            self.apply_gain(1.0 / peak);
        }
    }

    /// A peak-normalised copy
    pub fn normalised(&self) -> Sound {
        let mut out = self.clone();
        out.normalise();
        out
    }

    // ------------------------------------------------------------------------
    // Level
    // ------------------------------------------------------------------------

    /// RMS over all samples of all channels
    pub fn rms(&self) -> f64 {
        let total = self.n_channels() * self.n_samples();
        if total == 0 {
            return 0.0;
        }
        let sum_squares: f64 = self
            .channels
            .iter()
            .flat_map(|ch| ch.iter())
            .map(|s| s * s)
            .sum();
        (sum_squares / total as f64).sqrt()
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f64 {
        self.channels
            .iter()
            .map(|ch| calculate_peak(ch))
            .fold(0.0_f64, f64::max)
    }

    /// Sound level in dB relative to [`LEVEL_REFERENCE`]
    pub fn level(&self) -> f64 {
        self.level_re(LEVEL_REFERENCE)
    }

    /// Sound level in dB relative to an arbitrary reference amplitude
    pub fn level_re(&self, reference: f64) -> f64 {
        level_db(self.rms(), reference)
    }

    /// Level of each channel in dB relative to [`LEVEL_REFERENCE`]
    pub fn channel_levels(&self) -> Vec<f64> {
        self.channels
            .iter()
            .map(|ch| level_db(calculate_rms(ch), LEVEL_REFERENCE))
            .collect()
    }

    /// Rescale all channels by one gain so that [`Sound::level`] equals `level`
    ///
    /// Relative channel balance and sign are preserved.
    ///
    /// # Errors
    /// `InvalidParameter` for a non-finite target or a silent sound.
    pub fn set_level(&mut self, level: f64) -> Result<()> {
        self.set_level_re(level, LEVEL_REFERENCE)
    }

    /// [`Sound::set_level`] against an arbitrary reference amplitude
    pub fn set_level_re(&mut self, level: f64, reference: f64) -> Result<()> {
        if !level.is_finite() {
            return Err(SoundError::invalid("level", level, "must be finite"));
        }
        let current = self.level_re(reference);
        if !current.is_finite() {
            return Err(SoundError::invalid(
                "level",
                level,
                "cannot rescale a silent sound",
            ));
        }
        let gain = db_to_linear(level - current);
        debug!("Scaling sound from {:.2} dB to {:.2} dB (gain {:.6})", current, level, gain);
        self.apply_gain(gain);
        Ok(())
    }

    /// A copy rescaled to `level` dB
    pub fn with_level(&self, level: f64) -> Result<Sound> {
        let mut out = self.clone();
        out.set_level(level)?;
        Ok(out)
    }

    pub(crate) fn from_parts(channels: Vec<Vec<f64>>, samplerate: u32) -> Self {
        debug_assert!(!channels.is_empty());
        Self {
            channels,
            samplerate,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
