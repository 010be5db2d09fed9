//! Magnitude spectra
//!
//! One-sided DFT magnitudes per channel, computed with rustfft over the whole
//! sound (rectangular window, no zero padding).

use rustfft::{num_complex::Complex, FftPlanner};

use crate::analysis::plot::SpectrumPlot;
use crate::audio::metrics::linear_to_db;
use crate::audio::Sound;
use crate::error::Result;

/// Magnitude spectrum of a sound
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in Hz, `freqs[k] = k * samplerate / n`
    pub freqs: Vec<f64>,
    /// Per-channel magnitudes `|X_k| / n`, one entry per frequency bin
    pub magnitudes: Vec<Vec<f64>>,
}

impl Spectrum {
    /// Compute the spectrum of every channel of `sound`
    pub fn of(sound: &Sound) -> Spectrum {
        let n = sound.n_samples();
        if n == 0 {
            return Spectrum {
                freqs: Vec::new(),
                magnitudes: vec![Vec::new(); sound.n_channels()],
            };
        }

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let n_bins = n / 2 + 1;
        let bin_hz = sound.samplerate() as f64 / n as f64;

        let freqs = (0..n_bins).map(|k| k as f64 * bin_hz).collect();
        let magnitudes = sound
            .channels()
            .iter()
            .map(|channel| {
                let mut buffer: Vec<Complex<f64>> =
                    channel.iter().map(|&s| Complex::new(s, 0.0)).collect();
                fft.process(&mut buffer);
                buffer[..n_bins].iter().map(|c| c.norm() / n as f64).collect()
            })
            .collect();

        Spectrum { freqs, magnitudes }
    }

    /// Number of frequency bins
    pub fn n_bins(&self) -> usize {
        self.freqs.len()
    }

    /// Magnitudes of one channel
    ///
    /// # Panics
    /// Panics if the channel index is out of bounds
    pub fn channel(&self, channel: usize) -> &[f64] {
        &self.magnitudes[channel]
    }

    /// Magnitudes averaged over channels
    pub fn mean_magnitudes(&self) -> Vec<f64> {
        let n_channels = self.magnitudes.len().max(1) as f64;
        (0..self.n_bins())
            .map(|k| self.magnitudes.iter().map(|ch| ch[k]).sum::<f64>() / n_channels)
            .collect()
    }

    /// Power in dB per channel and bin (floored at -200 dB)
    pub fn power_db(&self) -> Vec<Vec<f64>> {
        self.magnitudes
            .iter()
            .map(|ch| ch.iter().map(|&m| linear_to_db(m).max(-200.0)).collect())
            .collect()
    }

    /// Frequency of the strongest bin of a channel (first one on ties)
    pub fn peak_frequency(&self, channel: usize) -> f64 {
        let mags = self.channel(channel);
        let mut best = 0;
        for (k, &m) in mags.iter().enumerate() {
            if m > mags[best] {
                best = k;
            }
        }
        self.freqs.get(best).copied().unwrap_or(0.0)
    }

    /// Frequencies of interior local maxima within `range_db` of the largest bin
    ///
    /// A bin is a local maximum when it is strictly larger than both
    /// neighbours; the first and last bins never qualify.
    pub fn peaks(&self, channel: usize, range_db: f64) -> Vec<f64> {
        let mags = self.channel(channel);
        let max = mags.iter().copied().fold(0.0_f64, f64::max);
        let floor = max * 10.0_f64.powf(-range_db / 20.0);
        mags.windows(3)
            .enumerate()
            .filter(|(_, w)| w[1] > w[0] && w[1] > w[2] && w[1] >= floor)
            .map(|(i, _)| self.freqs[i + 1])
            .collect()
    }
}

impl Sound {
    /// Magnitude spectrum of the sound
    pub fn spectrum(&self) -> Spectrum {
        Spectrum::of(self)
    }

    /// Magnitude spectrum, also handed to a plotting collaborator
    ///
    /// The returned spectrum is identical to [`Sound::spectrum`].
    pub fn spectrum_with_plot(&self, plot: &mut dyn SpectrumPlot) -> Result<Spectrum> {
        let spectrum = self.spectrum();
        plot.plot(&spectrum.freqs, &spectrum.magnitudes)?;
        Ok(spectrum)
    }
}
