//! soundlab CLI
//!
//! Command-line front end for the soundlab sound library.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use soundlab::cli::{commands, Cli, Commands};
use soundlab::config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("soundlab v{}", env!("CARGO_PKG_VERSION"));

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    handle_command(cli.command, &settings)
}

fn handle_command(cmd: Commands, settings: &Settings) -> Result<()> {
    match cmd {
        Commands::Tone {
            frequency,
            duration,
            output,
        } => commands::tone(frequency, duration, &output, settings),
        Commands::Harmonic {
            f0,
            duration,
            schroeder,
            output,
        } => commands::harmonic(f0, duration, schroeder, &output, settings),
        Commands::Noise {
            kind,
            alpha,
            duration,
            output,
        } => commands::noise(kind, alpha, duration, &output, settings),
        Commands::Vowel {
            vowel,
            f0,
            duration,
            output,
        } => commands::vowel(&vowel, f0, duration, &output, settings),
        Commands::Info { input } => commands::info(&input, settings),
        Commands::Spectrum {
            input,
            feature,
            csv,
        } => commands::spectrum(&input, &feature, csv.as_deref()),
        Commands::Concat {
            inputs,
            overlap,
            output,
        } => commands::concat(&inputs, overlap, &output, settings),
        Commands::Normalise { input, output } => commands::normalise(&input, &output, settings),
        Commands::Level { input, set, output } => {
            commands::level(&input, set, output.as_deref(), settings)
        }
    }
}
