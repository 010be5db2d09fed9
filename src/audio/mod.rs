//! Sound container and file I/O
//!
//! This module provides the core sound data structure, its constructors,
//! level measurements and the WAV codec.

pub mod io;
pub mod metrics;
mod sound;
mod source;
mod span;

pub use io::{BitDepth, Codec, WavCodec};
pub use metrics::LEVEL_REFERENCE;
pub use sound::Sound;
pub use source::{Array, SoundSource};
pub use span::Span;
