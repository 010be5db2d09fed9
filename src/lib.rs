//! soundlab - sound objects for auditory experiments
//!
//! A [`Sound`] is a matrix of `f64` samples (time × channel) with a
//! samplerate. The crate provides:
//! - Construction from arrays, other sounds or WAV files
//! - Generators: tones, harmonic complexes, white and power-law noise, vowels
//! - Transforms: sequencing, crossfading, ramps and overlapping frames
//! - Analysis: magnitude spectra, spectral features and sound levels
//!
//! # Example
//! ```
//! use soundlab::{Sound, SpectralFeature};
//!
//! let tone = Sound::tone(500.0, 0.1, 44100).unwrap();
//! let centroid = tone.spectral_feature(SpectralFeature::Centroid).unwrap();
//! assert!((centroid[0] - 500.0).abs() < 50.0);
//! ```

pub mod analysis;
pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod synthesis;
pub mod transform;

pub use analysis::{Spectrum, SpectralFeature};
pub use audio::{Array, BitDepth, Codec, Sound, SoundSource, Span, WavCodec, LEVEL_REFERENCE};
pub use config::Settings;
pub use error::{Result, SoundError};
pub use synthesis::{HarmonicOptions, HarmonicPhase, Vowel};
pub use transform::{FadeShape, FrameLayout, FrameTimes, Frames, RampEdge};
