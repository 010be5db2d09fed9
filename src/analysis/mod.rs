//! Spectral analysis
//!
//! Magnitude spectra, scalar spectral features and display hooks.

pub mod features;
pub mod plot;
pub mod spectrum;

pub use features::{SpectralFeature, DEFAULT_ROLLOFF};
pub use plot::{CsvPlot, SpectrumPlot};
pub use spectrum::Spectrum;
