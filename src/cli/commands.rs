//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::info;

use crate::analysis::{CsvPlot, SpectralFeature};
use crate::audio::metrics::linear_to_db;
use crate::audio::{BitDepth, Sound};
use crate::cli::NoiseKind;
use crate::config::Settings;
use crate::synthesis::{HarmonicOptions, HarmonicPhase, Vowel};

fn save(sound: &Sound, output: &Path, settings: &Settings) -> Result<()> {
    sound
        .write_with(output, true, &settings.codec())
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!(
        "Wrote {} ({} ch, {} samples, {} Hz)",
        output.display(),
        sound.n_channels(),
        sound.n_samples(),
        sound.samplerate()
    );
    Ok(())
}

fn load(input: &Path) -> Result<Sound> {
    Sound::read(input).with_context(|| format!("Failed to read {}", input.display()))
}

/// Generate a pure tone.
pub fn tone(frequency: f64, duration: f64, output: &Path, settings: &Settings) -> Result<()> {
    info!("Generating {} Hz tone", frequency);
    let sound = Sound::tone(frequency, duration, settings.samplerate)?;
    save(&sound, output, settings)
}

/// Generate a harmonic complex.
pub fn harmonic(
    f0: f64,
    duration: f64,
    schroeder: bool,
    output: &Path,
    settings: &Settings,
) -> Result<()> {
    info!("Generating harmonic complex at f0={} Hz", f0);
    let options = HarmonicOptions {
        phase: if schroeder {
            HarmonicPhase::Schroeder
        } else {
            HarmonicPhase::Sine
        },
        ..HarmonicOptions::default()
    };
    let sound = Sound::harmoniccomplex_with(f0, duration, settings.samplerate, &options)?;
    save(&sound, output, settings)
}

/// Generate white, pink or power-law noise.
pub fn noise(
    kind: NoiseKind,
    alpha: f64,
    duration: f64,
    output: &Path,
    settings: &Settings,
) -> Result<()> {
    info!("Generating {:?} noise", kind);
    let sound = match kind {
        NoiseKind::White => Sound::whitenoise(duration, settings.samplerate)?,
        NoiseKind::Pink => Sound::pinknoise(duration, settings.samplerate)?,
        NoiseKind::Powerlaw => Sound::powerlawnoise(alpha, duration, settings.samplerate)?,
    };
    save(&sound, output, settings)
}

/// Synthesise a vowel.
pub fn vowel(
    name: &str,
    f0: f64,
    duration: f64,
    output: &Path,
    settings: &Settings,
) -> Result<()> {
    let vowel: Vowel = name.parse()?;
    info!("Synthesising vowel {:?}", vowel);
    let sound = Sound::vowel_with(vowel, f0, duration, settings.samplerate)?;
    save(&sound, output, settings)
}

/// Print shape and level information.
pub fn info(input: &Path, settings: &Settings) -> Result<()> {
    let sound = load(input)?;
    let frames = sound.frame_layout(settings.frame_duration)?;

    println!("File: {}", input.display());
    println!("{:-<40}", "");
    println!("Samplerate: {} Hz", sound.samplerate());
    println!("Channels:   {}", sound.n_channels());
    println!("Samples:    {}", sound.n_samples());
    println!("Duration:   {:.3} s", sound.duration());
    println!("Peak:       {:.4}", sound.peak());
    println!("Level:      {:.2} dB", sound.level_re(settings.level_reference));
    println!(
        "Frames:     {} of {} samples",
        frames.n_frames(),
        frames.length()
    );
    Ok(())
}

/// Print a spectral feature per channel, optionally writing the spectrum as CSV.
pub fn spectrum(input: &Path, feature: &str, csv: Option<&Path>) -> Result<()> {
    let sound = load(input)?;
    let feature: SpectralFeature = feature.parse()?;

    let spectrum = match csv {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut plot = CsvPlot::new(BufWriter::new(file));
            let spectrum = sound.spectrum_with_plot(&mut plot)?;
            info!("Spectrum written to {}", path.display());
            spectrum
        }
        None => sound.spectrum(),
    };

    for (channel, value) in spectrum.feature(feature)?.iter().enumerate() {
        println!("ch{}: {:?} = {:.3}", channel, feature, value);
    }
    Ok(())
}

/// Join files end to end, with an optional crossfade.
pub fn concat(
    inputs: &[PathBuf],
    overlap: Option<f64>,
    output: &Path,
    settings: &Settings,
) -> Result<()> {
    let sounds = inputs
        .iter()
        .map(|path| load(path))
        .collect::<Result<Vec<_>>>()?;

    let joined = match overlap {
        Some(seconds) => {
            info!("Crossfading {} files over {} s", sounds.len(), seconds);
            Sound::crossfade_with(&sounds, seconds, settings.fade)?
        }
        None => {
            info!("Sequencing {} files", sounds.len());
            Sound::sequence(&sounds)?
        }
    };
    save(&joined, output, settings)
}

/// Peak-normalise a file.
pub fn normalise(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let sound = load(input)?;
    save(&sound, output, settings)
}

/// Print the level, or rescale to a target level.
pub fn level(
    input: &Path,
    target: Option<f64>,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let mut sound = load(input)?;
    println!("Level: {:.2} dB", sound.level_re(settings.level_reference));

    if let (Some(db), Some(output)) = (target, output) {
        sound.set_level_re(db, settings.level_reference)?;
        // Integer PCM cannot hold samples beyond full scale.
        let peak = sound.peak();
        if peak > 1.0 && settings.bit_depth != BitDepth::Float32 {
            let ceiling = db - linear_to_db(peak);
            bail!(
                "{:.2} dB would clip {} (peak {:.3}); the highest level without clipping is {:.2} dB",
                db,
                input.display(),
                peak,
                ceiling
            );
        }
        sound
            .write_with(output, false, &settings.codec())
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Rescaled to {:.2} dB: {}", db, output.display());
    }
    Ok(())
}
