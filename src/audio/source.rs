//! Polymorphic sound construction
//!
//! Everything a sound can be built from is a [`SoundSource`] arm; each arm is
//! validated on its own before a [`Sound`] is assembled.

use std::path::{Path, PathBuf};

use log::debug;

use crate::audio::io::{Codec, WavCodec};
use crate::audio::Sound;
use crate::error::{Result, SoundError};

/// A raw sample array
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    /// One-dimensional samples, a single channel
    Mono(Vec<f64>),
    /// Two-dimensional samples, rows are frames and columns are channels
    Frames(Vec<Vec<f64>>),
}

impl Array {
    /// Number of frames in the array
    pub fn n_frames(&self) -> usize {
        match self {
            Array::Mono(samples) => samples.len(),
            Array::Frames(frames) => frames.len(),
        }
    }

    /// Transpose into per-channel vectors
    ///
    /// # Errors
    /// `ShapeMismatch` for ragged rows or rows without any channel.
    pub fn into_channels(self) -> Result<Vec<Vec<f64>>> {
        match self {
            Array::Mono(samples) => Ok(vec![samples]),
            Array::Frames(frames) => {
                let n_channels = frames.first().map(|row| row.len()).unwrap_or(0);
                if n_channels == 0 {
                    return Err(SoundError::shape("frame array has no channels"));
                }
                let mut channels = vec![Vec::with_capacity(frames.len()); n_channels];
                for (i, row) in frames.into_iter().enumerate() {
                    if row.len() != n_channels {
                        return Err(SoundError::shape(format!(
                            "frame {} has {} channels, frame 0 has {}",
                            i,
                            row.len(),
                            n_channels
                        )));
                    }
                    for (ch, sample) in row.into_iter().enumerate() {
                        channels[ch].push(sample);
                    }
                }
                Ok(channels)
            }
        }
    }
}

impl From<Vec<f64>> for Array {
    fn from(samples: Vec<f64>) -> Self {
        Array::Mono(samples)
    }
}

impl From<Vec<Vec<f64>>> for Array {
    fn from(frames: Vec<Vec<f64>>) -> Self {
        Array::Frames(frames)
    }
}

/// Anything a [`Sound`] can be constructed from
#[derive(Debug, Clone, PartialEq)]
pub enum SoundSource {
    /// A single array, rows are frames
    Array(Array),
    /// Several arrays whose channels are stacked side by side
    Arrays(Vec<Array>),
    /// Existing sounds whose channels are stacked side by side
    Sounds(Vec<Sound>),
    /// A WAV file
    Path(PathBuf),
}

impl From<Array> for SoundSource {
    fn from(array: Array) -> Self {
        SoundSource::Array(array)
    }
}

impl From<Vec<f64>> for SoundSource {
    fn from(samples: Vec<f64>) -> Self {
        SoundSource::Array(Array::Mono(samples))
    }
}

impl From<Vec<Vec<f64>>> for SoundSource {
    fn from(frames: Vec<Vec<f64>>) -> Self {
        SoundSource::Array(Array::Frames(frames))
    }
}

impl From<Vec<Array>> for SoundSource {
    fn from(arrays: Vec<Array>) -> Self {
        SoundSource::Arrays(arrays)
    }
}

impl From<Vec<Sound>> for SoundSource {
    fn from(sounds: Vec<Sound>) -> Self {
        SoundSource::Sounds(sounds)
    }
}

impl From<PathBuf> for SoundSource {
    fn from(path: PathBuf) -> Self {
        SoundSource::Path(path)
    }
}

impl From<&Path> for SoundSource {
    fn from(path: &Path) -> Self {
        SoundSource::Path(path.to_path_buf())
    }
}

impl From<&str> for SoundSource {
    fn from(path: &str) -> Self {
        SoundSource::Path(PathBuf::from(path))
    }
}

impl From<String> for SoundSource {
    fn from(path: String) -> Self {
        SoundSource::Path(PathBuf::from(path))
    }
}

impl Sound {
    /// Build a sound from any [`SoundSource`]
    ///
    /// Arrays require a samplerate. Sounds carry their own samplerate; a
    /// given one must agree with it. Files are decoded with the default
    /// [`WavCodec`] and ignore the argument.
    ///
    /// # Errors
    /// * `MissingParameter` - array input without a samplerate
    /// * `ShapeMismatch` - inputs disagree on frame count or samplerate
    /// * `DecodeError` - the file could not be read
    pub fn from_source(source: impl Into<SoundSource>, samplerate: Option<u32>) -> Result<Sound> {
        match source.into() {
            SoundSource::Array(array) => {
                let samplerate = require_samplerate(samplerate)?;
                Sound::new(array.into_channels()?, samplerate)
            }
            SoundSource::Arrays(arrays) => {
                let samplerate = require_samplerate(samplerate)?;
                let n_frames = first_frame_count(arrays.iter().map(Array::n_frames))?;
                let mut channels = Vec::new();
                for array in arrays {
                    channels.extend(array.into_channels()?);
                }
                debug!("Stacked {} channels of {} frames", channels.len(), n_frames);
                Sound::new(channels, samplerate)
            }
            SoundSource::Sounds(sounds) => stack_sounds(sounds, samplerate),
            SoundSource::Path(path) => {
                if let Some(rate) = samplerate {
                    debug!("Ignoring samplerate {} for file input {}", rate, path.display());
                }
                Sound::read(&path)
            }
        }
    }

    /// Decode a WAV file with the default codec
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Sound> {
        Sound::read_with(path, &WavCodec::default())
    }

    /// Decode a file with a specific codec
    pub fn read_with<P: AsRef<Path>>(path: P, codec: &dyn Codec) -> Result<Sound> {
        let (channels, samplerate) = codec.decode(path.as_ref())?;
        Sound::new(channels, samplerate)
    }
}

fn require_samplerate(samplerate: Option<u32>) -> Result<u32> {
    samplerate.ok_or(SoundError::MissingParameter {
        parameter: "samplerate",
    })
}

fn first_frame_count(mut counts: impl Iterator<Item = usize>) -> Result<usize> {
    let Some(expected) = counts.next() else {
        return Err(SoundError::shape("cannot build a sound from an empty list"));
    };
    if let Some(other) = counts.find(|&n| n != expected) {
        return Err(SoundError::shape(format!(
            "inputs have different lengths ({} and {} samples)",
            expected, other
        )));
    }
    Ok(expected)
}

fn stack_sounds(sounds: Vec<Sound>, samplerate: Option<u32>) -> Result<Sound> {
    first_frame_count(sounds.iter().map(Sound::n_samples))?;
    let rate = samplerate.unwrap_or_else(|| sounds[0].samplerate());
    if let Some(other) = sounds.iter().find(|s| s.samplerate() != rate) {
        return Err(SoundError::shape(format!(
            "samplerates differ ({} Hz and {} Hz)",
            rate,
            other.samplerate()
        )));
    }
    let channels = sounds
        .into_iter()
        .flat_map(Sound::into_channels)
        .collect();
    Sound::new(channels, rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_array_requires_samplerate() {
        let result = Sound::from_source(vec![0.0_f64, 1.0], None);
        assert!(matches!(
            result,
            Err(SoundError::MissingParameter {
                parameter: "samplerate"
            })
        ));
    }

    #[test]
    fn test_ragged_frames_rejected() {
        let result = Sound::from_source(vec![vec![0.0_f64, 1.0], vec![0.0]], Some(10));
        assert!(matches!(result, Err(SoundError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_arrays_stack_channels() {
        let data: Vec<Vec<f64>> = vec![vec![1.0, 2.0]; 10];
        let sound = Sound::from_source(
            vec![Array::from(data.clone()), Array::Mono(vec![3.0; 10])],
            Some(10),
        )
        .unwrap();
        assert_eq!(sound.n_channels(), 3);
        assert_eq!(sound.channel(1), &[2.0; 10]);
        assert_eq!(sound.channel(2), &[3.0; 10]);
    }

    #[test]
    fn test_arrays_length_mismatch() {
        let result = Sound::from_source(
            vec![Array::Mono(vec![0.0; 10]), Array::Mono(vec![0.0; 11])],
            Some(10),
        );
        assert!(matches!(result, Err(SoundError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_sounds_must_agree() {
        let a = Sound::from_mono(vec![0.0; 10], 10).unwrap();
        let b = Sound::from_mono(vec![0.0; 10], 20).unwrap();
        let c = Sound::from_mono(vec![0.0; 9], 10).unwrap();
        assert!(Sound::from_source(vec![a.clone(), b], None).is_err());
        assert!(Sound::from_source(vec![a.clone(), c], None).is_err());
        assert!(Sound::from_source(vec![a.clone(), a.clone()], Some(20)).is_err());
        assert!(Sound::from_source(Vec::<Sound>::new(), None).is_err());
        assert_eq!(
            Sound::from_source(vec![a.clone(), a], Some(10)).unwrap().n_channels(),
            2
        );
    }

    #[test]
    fn test_missing_file_is_decode_error() {
        let result = Sound::from_source("/nonexistent/path/sound.wav", None);
        assert!(matches!(result, Err(SoundError::DecodeError { .. })));
    }
}
