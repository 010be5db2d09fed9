//! Durations expressed either in samples or in seconds

use crate::error::{Result, SoundError};

/// A length of time, given in samples or in seconds
///
/// Integers convert to [`Span::Samples`] and floats to [`Span::Seconds`], so
/// `Sound::tone(500.0, 4410, 44100)` and `Sound::tone(500.0, 0.1, 44100)`
/// describe the same sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Span {
    /// Exact number of samples
    Samples(usize),
    /// Duration in seconds, rounded to the nearest sample
    Seconds(f64),
}

impl Span {
    /// Convert to a sample count at the given samplerate
    ///
    /// # Errors
    /// `InvalidParameter` for negative or non-finite seconds.
    pub fn in_samples(self, samplerate: u32) -> Result<usize> {
        match self {
            Span::Samples(n) => Ok(n),
            Span::Seconds(secs) => {
                let samples = checked_seconds(secs)? * samplerate as f64;
                Ok(samples.round() as usize)
            }
        }
    }

    /// Like [`Span::in_samples`], but seconds are truncated to whole samples
    ///
    /// Used where a partial sample must not count, such as crossfade overlaps.
    pub fn in_samples_floor(self, samplerate: u32) -> Result<usize> {
        match self {
            Span::Samples(n) => Ok(n),
            Span::Seconds(secs) => {
                let samples = checked_seconds(secs)? * samplerate as f64;
                Ok(samples.floor() as usize)
            }
        }
    }

    /// Like [`Span::in_samples`], but zero-length spans are rejected
    pub(crate) fn in_nonzero_samples(self, samplerate: u32) -> Result<usize> {
        let n = self.in_samples(samplerate)?;
        if n == 0 {
            let value = match self {
                Span::Samples(n) => n as f64,
                Span::Seconds(secs) => secs,
            };
            return Err(SoundError::invalid("duration", value, "must be at least one sample"));
        }
        Ok(n)
    }
}

fn checked_seconds(secs: f64) -> Result<f64> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(SoundError::invalid(
            "duration",
            secs,
            "must be a finite, non-negative number of seconds",
        ));
    }
    Ok(secs)
}

impl From<usize> for Span {
    fn from(samples: usize) -> Self {
        Span::Samples(samples)
    }
}

impl From<f64> for Span {
    fn from(seconds: f64) -> Self {
        Span::Seconds(seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_round_to_nearest_sample() {
        assert_eq!(Span::from(0.1).in_samples(44100).unwrap(), 4410);
        assert_eq!(Span::from(0.01).in_samples(44100).unwrap(), 441);
        assert_eq!(Span::from(0.5).in_samples(3).unwrap(), 2);
    }

    #[test]
    fn test_floor_truncates_partial_samples() {
        assert_eq!(Span::from(0.0157).in_samples_floor(1000).unwrap(), 15);
        assert_eq!(Span::from(0.0157).in_samples(1000).unwrap(), 16);
        assert_eq!(Span::from(0.01).in_samples_floor(44100).unwrap(), 441);
        assert_eq!(Span::from(17usize).in_samples_floor(1000).unwrap(), 17);
        assert!(Span::Seconds(-0.5).in_samples_floor(1000).is_err());
    }

    #[test]
    fn test_samples_pass_through() {
        assert_eq!(Span::from(1234usize).in_samples(8000).unwrap(), 1234);
    }

    #[test]
    fn test_invalid_seconds() {
        assert!(Span::Seconds(-1.0).in_samples(8000).is_err());
        assert!(Span::Seconds(f64::NAN).in_samples(8000).is_err());
        assert!(Span::Samples(0).in_nonzero_samples(8000).is_err());
        assert!(Span::Seconds(0.00001).in_nonzero_samples(8000).is_err());
    }
}
