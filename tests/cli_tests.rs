//! CLI command tests
//!
//! Runs the command implementations against temporary files.

use std::fs;

use clap::Parser;
use tempfile::tempdir;

use soundlab::cli::{commands, Cli, Commands, NoiseKind};
use soundlab::{BitDepth, Settings, Sound};

fn settings() -> Settings {
    Settings {
        samplerate: 8000,
        ..Settings::default()
    }
}

#[test]
fn test_parse_concat() {
    let cli = Cli::parse_from([
        "soundlab", "concat", "a.wav", "b.wav", "--overlap", "0.1", "-o", "out.wav",
    ]);
    match cli.command {
        Commands::Concat {
            inputs, overlap, ..
        } => {
            assert_eq!(inputs.len(), 2);
            assert_eq!(overlap, Some(0.1));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_level_set_requires_output() {
    assert!(Cli::try_parse_from(["soundlab", "level", "in.wav", "--set", "70"]).is_err());
}

#[test]
fn test_generate_and_concat() {
    let dir = tempdir().unwrap();
    let tone = dir.path().join("tone.wav");
    let noise = dir.path().join("noise.wav");
    let joined = dir.path().join("joined.wav");
    let settings = settings();

    commands::tone(440.0, 0.5, &tone, &settings).unwrap();
    commands::noise(NoiseKind::Pink, 1.0, 0.25, &noise, &settings).unwrap();
    commands::concat(&[tone.clone(), noise.clone()], Some(0.05), &joined, &settings).unwrap();

    let sound = Sound::read(&joined).unwrap();
    assert_eq!(sound.samplerate(), 8000);
    assert_eq!(sound.n_samples(), 4000 + 2000 - 400);
}

#[test]
fn test_spectrum_writes_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("vowel.wav");
    let csv = dir.path().join("spectrum.csv");
    let settings = Settings {
        bit_depth: BitDepth::Float32,
        ..settings()
    };

    commands::vowel("o", 110.0, 0.2, &input, &settings).unwrap();
    commands::spectrum(&input, "flatness", Some(csv.as_path())).unwrap();

    let text = fs::read_to_string(&csv).unwrap();
    assert!(text.starts_with("frequency,ch0\n"));
    assert_eq!(text.lines().count(), 1 + 1600 / 2 + 1);
}

#[test]
fn test_unknown_names_are_errors() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let settings = settings();
    commands::tone(300.0, 0.1, &input, &settings).unwrap();

    assert!(commands::spectrum(&input, "brightness", None).is_err());
    assert!(commands::vowel("y", 120.0, 0.1, &input, &settings).is_err());
}

#[test]
fn test_level_rescales() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("harmonic.wav");
    let output = dir.path().join("quiet.wav");
    let settings = settings();

    commands::harmonic(200.0, 0.2, true, &input, &settings).unwrap();
    commands::level(&input, Some(70.0), Some(output.as_path()), &settings).unwrap();

    let quiet = Sound::read(&output).unwrap();
    assert!((quiet.level() - 70.0).abs() < 0.1);
}

#[test]
fn test_level_refuses_to_clip_integer_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let output = dir.path().join("loud.wav");
    let settings = settings();
    commands::tone(500.0, 0.2, &input, &settings).unwrap();

    // A full-scale sine sits near 91 dB, so 100 dB needs a peak near 2.8.
    let err = commands::level(&input, Some(100.0), Some(output.as_path()), &settings).unwrap_err();
    assert!(err.to_string().contains("would clip"));
    assert!(!output.exists());

    let float_settings = Settings {
        bit_depth: BitDepth::Float32,
        ..settings
    };
    commands::level(&input, Some(100.0), Some(output.as_path()), &float_settings).unwrap();
    let loud = Sound::read(&output).unwrap();
    assert!(loud.peak() > 1.0);
    assert!((loud.level() - 100.0).abs() < 0.01);
}
