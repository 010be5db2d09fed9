//! Onset and offset ramps

use std::f64::consts::PI;

use crate::audio::{Sound, Span};
use crate::error::{Result, SoundError};

/// Which ends of a sound get a ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampEdge {
    Onset,
    Offset,
    #[default]
    Both,
}

impl Sound {
    /// Copy of the sound with raised-cosine ramps at its edges
    ///
    /// # Errors
    /// `InvalidParameter` if the ramps do not fit inside the sound.
    pub fn ramped(&self, duration: impl Into<Span>, edge: RampEdge) -> Result<Sound> {
        let len = duration.into().in_samples(self.samplerate())?;
        let edges = match edge {
            RampEdge::Both => 2,
            RampEdge::Onset | RampEdge::Offset => 1,
        };
        if len * edges > self.n_samples() {
            return Err(SoundError::invalid(
                "ramp",
                len as f64,
                "ramps are longer than the sound",
            ));
        }

        let envelope: Vec<f64> = (0..len)
            .map(|i| 0.5 * (1.0 - (PI * i as f64 / len as f64).cos()))
            .collect();
        let n = self.n_samples();
        let channels = self
            .channels()
            .iter()
            .map(|ch| {
                let mut out = ch.clone();
                if matches!(edge, RampEdge::Onset | RampEdge::Both) {
                    for (s, g) in out.iter_mut().zip(&envelope) {
                        *s *= g;
                    }
                }
                if matches!(edge, RampEdge::Offset | RampEdge::Both) {
                    for (s, g) in out[n - len..].iter_mut().rev().zip(&envelope) {
                        *s *= g;
                    }
                }
                out
            })
            .collect();

        Ok(Sound::from_parts(channels, self.samplerate()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_shape() {
        let sound = Sound::from_mono(vec![1.0; 20], 100).unwrap();
        let ramped = sound.ramped(5usize, RampEdge::Both).unwrap();
        let ch = ramped.channel(0);
        assert_eq!(ch[0], 0.0);
        assert_eq!(ch[19], 0.0);
        assert!(ch[..5].windows(2).all(|w| w[1] > w[0]));
        assert_eq!(&ch[5..15], &[1.0; 10]);
    }

    #[test]
    fn test_onset_only() {
        let sound = Sound::from_mono(vec![1.0; 10], 100).unwrap();
        let ramped = sound.ramped(4usize, RampEdge::Onset).unwrap();
        assert_eq!(ramped.channel(0)[0], 0.0);
        assert_eq!(ramped.channel(0)[9], 1.0);
    }

    #[test]
    fn test_ramp_too_long() {
        let sound = Sound::from_mono(vec![1.0; 10], 100).unwrap();
        assert!(sound.ramped(6usize, RampEdge::Both).is_err());
        assert!(sound.ramped(10usize, RampEdge::Offset).is_ok());
    }
}
