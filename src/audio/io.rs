//! Audio file I/O operations
//!
//! The [`Codec`] trait is the seam between sounds and files. [`WavCodec`]
//! reads and writes PCM WAV files using the hound crate.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::audio::Sound;
use crate::error::{Result, SoundError};

/// Encodes per-channel samples to a file and decodes them back
pub trait Codec {
    /// Write `channels` (all of equal length) at `samplerate` to `path`
    fn encode(&self, path: &Path, channels: &[Vec<f64>], samplerate: u32) -> Result<()>;

    /// Read a file into per-channel samples and its samplerate
    fn decode(&self, path: &Path) -> Result<(Vec<Vec<f64>>, u32)>;
}

/// Sample encoding used when writing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitDepth {
    /// 16-bit integer PCM
    #[default]
    Int16,
    /// 24-bit integer PCM
    Int24,
    /// 32-bit IEEE float
    Float32,
}

impl BitDepth {
    /// Bits per sample
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Int16 => 16,
            BitDepth::Int24 => 24,
            BitDepth::Float32 => 32,
        }
    }

    fn spec(&self, channels: u16, samplerate: u32) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: samplerate,
            bits_per_sample: self.bits(),
            sample_format: match self {
                BitDepth::Float32 => SampleFormat::Float,
                _ => SampleFormat::Int,
            },
        }
    }
}

/// PCM WAV codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WavCodec {
    /// Encoding used by [`Codec::encode`]; decoding accepts any PCM layout
    pub bit_depth: BitDepth,
}

impl WavCodec {
    pub fn new(bit_depth: BitDepth) -> Self {
        Self { bit_depth }
    }
}

impl Codec for WavCodec {
    fn encode(&self, path: &Path, channels: &[Vec<f64>], samplerate: u32) -> Result<()> {
        let n_channels = u16::try_from(channels.len()).map_err(|_| SoundError::UnsupportedFormat {
            details: format!("{} channels exceed the WAV limit", channels.len()),
        })?;
        let spec = self.bit_depth.spec(n_channels, samplerate);
        let encode_err = |e| SoundError::EncodeError {
            path: path.display().to_string(),
            source: e,
        };

        // The writer is dropped on every early return, which closes the file.
        let mut writer = WavWriter::create(path, spec).map_err(encode_err)?;
        let n_samples = channels.first().map(|ch| ch.len()).unwrap_or(0);

        match self.bit_depth {
            BitDepth::Float32 => {
                for i in 0..n_samples {
                    for channel in channels {
                        writer.write_sample(channel[i] as f32).map_err(encode_err)?;
                    }
                }
            }
            BitDepth::Int16 | BitDepth::Int24 => {
                let max_val = int_scale(self.bit_depth.bits());
                let mut clipped = 0usize;
                for i in 0..n_samples {
                    for channel in channels {
                        let sample = channel[i];
                        if sample.abs() > 1.0 {
                            clipped += 1;
                        }
                        let int_sample = (sample.clamp(-1.0, 1.0) * max_val).round() as i32;
                        if self.bit_depth == BitDepth::Int16 {
                            writer.write_sample(int_sample as i16).map_err(encode_err)?;
                        } else {
                            writer.write_sample(int_sample).map_err(encode_err)?;
                        }
                    }
                }
                if clipped > 0 {
                    warn!(
                        "{} samples outside [-1, 1] were clipped while writing {}",
                        clipped,
                        path.display()
                    );
                }
            }
        }

        writer.finalize().map_err(encode_err)?;
        debug!(
            "Wrote {} frames x {} channels at {} Hz to {}",
            n_samples,
            n_channels,
            samplerate,
            path.display()
        );
        Ok(())
    }

    fn decode(&self, path: &Path) -> Result<(Vec<Vec<f64>>, u32)> {
        let decode_err = |e| SoundError::DecodeError {
            path: path.display().to_string(),
            source: e,
        };
        let reader = WavReader::open(path).map_err(decode_err)?;

        let spec = reader.spec();
        let channels = spec.channels as usize;
        if channels == 0 {
            return Err(SoundError::UnsupportedFormat {
                details: "file declares zero channels".to_string(),
            });
        }

        let interleaved: Vec<f64> = match spec.sample_format {
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(f64::from).map_err(decode_err))
                .collect::<Result<Vec<f64>>>()?,
            SampleFormat::Int => {
                let bits = spec.bits_per_sample;
                if !matches!(bits, 8 | 16 | 24 | 32) {
                    return Err(SoundError::UnsupportedFormat {
                        details: format!("{}-bit integer audio", bits),
                    });
                }
                let max_val = int_scale(bits);
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_val).map_err(decode_err))
                    .collect::<Result<Vec<f64>>>()?
            }
        };

        debug!(
            "Read {} samples in {} channels at {} Hz from {}",
            interleaved.len(),
            channels,
            spec.sample_rate,
            path.display()
        );
        Ok((deinterleave(&interleaved, channels), spec.sample_rate))
    }
}

impl Sound {
    /// Write the sound as 16-bit PCM WAV
    ///
    /// With `normalise` the written samples are divided by the largest
    /// absolute sample. The sound itself is never modified.
    pub fn write<P: AsRef<Path>>(&self, path: P, normalise: bool) -> Result<()> {
        self.write_with(path, normalise, &WavCodec::default())
    }

    /// Write the sound with a specific codec
    pub fn write_with<P: AsRef<Path>>(&self, path: P, normalise: bool, codec: &dyn Codec) -> Result<()> {
        if normalise {
            let normalised = self.normalised();
            codec.encode(path.as_ref(), normalised.channels(), self.samplerate())
        } else {
            codec.encode(path.as_ref(), self.channels(), self.samplerate())
        }
    }
}

/// Largest positive integer for a bit depth, used symmetrically for scaling
fn int_scale(bits: u16) -> f64 {
    ((1u64 << (bits - 1)) - 1) as f64
}

/// De-interleave samples from [L,R,L,R,...] to [[L,L,...], [R,R,...]]
fn deinterleave(samples: &[f64], channels: usize) -> Vec<Vec<f64>> {
    let frames = samples.len() / channels;
    let mut result = vec![Vec::with_capacity(frames); channels];

    for frame in samples.chunks_exact(channels) {
        for (ch, &sample) in frame.iter().enumerate() {
            result[ch].push(sample);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tempfile::tempdir;

    fn stereo_ramp(n: usize) -> Sound {
        let left: Vec<f64> = (0..n).map(|i| i as f64 / n as f64 * 2.0 - 1.0).collect();
        let right: Vec<f64> = left.iter().map(|s| -s * 0.5).collect();
        Sound::new(vec![left, right], 1000).unwrap()
    }

    #[test]
    fn test_deinterleave() {
        let channels = deinterleave(&[1.0, 5.0, 2.0, 6.0, 3.0, 7.0], 2);
        assert_eq!(channels, vec![vec![1.0, 2.0, 3.0], vec![5.0, 6.0, 7.0]]);
    }

    #[test]
    fn test_round_trip_16bit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test_16bit.wav");

        let original = stereo_ramp(500);
        original.write(&path, false).unwrap();
        let loaded = Sound::read(&path).unwrap();

        assert_eq!(loaded.samplerate(), 1000);
        assert_eq!(loaded.n_channels(), 2);
        assert_eq!(loaded.n_samples(), 500);
        for ch in 0..2 {
            for (a, b) in original.channel(ch).iter().zip(loaded.channel(ch)) {
                assert_abs_diff_eq!(a, b, epsilon = 1.0 / 32767.0);
            }
        }
    }

    #[test]
    fn test_round_trip_24bit_and_float() {
        let dir = tempdir().unwrap();
        let original = stereo_ramp(300);

        for (depth, tolerance) in [(BitDepth::Int24, 1e-6), (BitDepth::Float32, 1e-7)] {
            let path = dir.path().join(format!("test_{}.wav", depth.bits()));
            let codec = WavCodec::new(depth);
            original.write_with(&path, false, &codec).unwrap();
            let loaded = Sound::read_with(&path, &codec).unwrap();
            for (a, b) in original.channel(0).iter().zip(loaded.channel(0)) {
                assert_abs_diff_eq!(a, b, epsilon = tolerance);
            }
        }
    }

    #[test]
    fn test_write_normalised_does_not_mutate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("norm.wav");
        let original = stereo_ramp(100).with_gain(0.25);
        let before = original.clone();

        original.write(&path, true).unwrap();
        assert_eq!(original, before);

        let loaded = Sound::read(&path).unwrap();
        assert_abs_diff_eq!(loaded.peak(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unnormalised_write_clips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        let loud = Sound::from_mono(vec![2.0, -3.0, 0.5], 100).unwrap();
        loud.write(&path, false).unwrap();
        let loaded = Sound::read(&path).unwrap();
        assert_eq!(loaded.channel(0)[0], 1.0);
        assert_eq!(loaded.channel(0)[1], -1.0);
    }

    #[test]
    fn test_decode_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.wav");
        std::fs::write(&path, b"definitely not a riff header").unwrap();
        let result = Sound::read(&path);
        assert!(matches!(result, Err(SoundError::DecodeError { .. })));
    }
}
