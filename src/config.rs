//! Settings shared by the command-line tool
//!
//! Stored as JSON; missing fields fall back to their defaults.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::audio::{BitDepth, WavCodec, LEVEL_REFERENCE};
use crate::error::{Result, SoundError};
use crate::transform::FadeShape;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Samplerate for generated sounds (Hz)
    pub samplerate: u32,
    /// Sample format for written files
    pub bit_depth: BitDepth,
    /// Reference amplitude for levels
    pub level_reference: f64,
    /// Fade curve for crossfades
    pub fade: FadeShape,
    /// Analysis frame length in samples
    pub frame_duration: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            samplerate: 44100,
            bit_depth: BitDepth::Int16,
            level_reference: LEVEL_REFERENCE,
            fade: FadeShape::Linear,
            frame_duration: 1024,
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let settings: Settings = serde_json::from_reader(BufReader::new(file))?;
        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.samplerate == 0 {
            return Err(SoundError::invalid("samplerate", 0.0, "must be positive"));
        }
        if !(self.level_reference.is_finite() && self.level_reference > 0.0) {
            return Err(SoundError::invalid(
                "level_reference",
                self.level_reference,
                "must be a positive amplitude",
            ));
        }
        if self.frame_duration == 0 {
            return Err(SoundError::invalid("frame_duration", 0.0, "must be positive"));
        }
        Ok(())
    }

    /// WAV codec writing at the configured bit depth
    pub fn codec(&self) -> WavCodec {
        WavCodec::new(self.bit_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.samplerate, 44100);
        assert_eq!(settings.codec().bit_depth, BitDepth::Int16);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            samplerate: 22050,
            bit_depth: BitDepth::Float32,
            fade: FadeShape::EqualPower,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "samplerate": 8000, "fade": "equal_power" }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.samplerate, 8000);
        assert_eq!(settings.fade, FadeShape::EqualPower);
        assert_eq!(settings.frame_duration, 1024);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "level_reference": -1.0 }"#).unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(SoundError::InvalidParameter { param: "level_reference", .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Settings::load(&path),
            Err(SoundError::SerializationError(_))
        ));
    }
}
