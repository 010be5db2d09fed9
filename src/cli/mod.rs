//! CLI Module
//!
//! Command-line interface for generating, inspecting and joining sounds.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// soundlab - generate, analyse and join sounds
#[derive(Parser, Debug)]
#[command(name = "soundlab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Noise colours available from the `noise` command
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoiseKind {
    White,
    Pink,
    Powerlaw,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a pure tone
    Tone {
        /// Frequency in Hz
        #[arg(short, long, default_value_t = 1000.0)]
        frequency: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Output WAV file
        output: PathBuf,
    },

    /// Write a harmonic complex
    Harmonic {
        /// Fundamental frequency in Hz
        #[arg(short, long, default_value_t = 200.0)]
        f0: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Use Schroeder phases instead of sine phases
        #[arg(long)]
        schroeder: bool,

        /// Output WAV file
        output: PathBuf,
    },

    /// Write noise
    Noise {
        #[arg(short, long, value_enum, default_value_t = NoiseKind::White)]
        kind: NoiseKind,

        /// Spectral slope for power-law noise
        #[arg(short, long, default_value_t = 1.0)]
        alpha: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Output WAV file
        output: PathBuf,
    },

    /// Write a synthetic vowel
    Vowel {
        /// One of a, e, i, o, u, ae
        #[arg(long, default_value = "a")]
        vowel: String,

        /// Fundamental frequency in Hz
        #[arg(short, long, default_value_t = crate::synthesis::DEFAULT_VOWEL_F0)]
        f0: f64,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Output WAV file
        output: PathBuf,
    },

    /// Print shape and level of a WAV file
    Info {
        input: PathBuf,
    },

    /// Print a spectral feature of a WAV file
    Spectrum {
        input: PathBuf,

        /// centroid, flatness or rolloff
        #[arg(short, long, default_value = "centroid")]
        feature: String,

        /// Also write the spectrum as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Join WAV files end to end, optionally crossfading
    Concat {
        /// Input WAV files, in order
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Crossfade length in seconds
        #[arg(long)]
        overlap: Option<f64>,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Peak-normalise a WAV file
    Normalise {
        input: PathBuf,
        output: PathBuf,
    },

    /// Print the level of a WAV file, or rescale it to a target level
    Level {
        input: PathBuf,

        /// Target level in dB
        #[arg(long, requires = "output")]
        set: Option<f64>,

        /// Output WAV file for the rescaled sound
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
