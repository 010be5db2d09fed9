//! Spectrum display collaborators

use std::io::Write;

use crate::audio::metrics::linear_to_db;
use crate::error::Result;

/// Receives a computed spectrum for display
///
/// Implementations only read the data; the spectrum handed back by
/// [`Sound::spectrum_with_plot`](crate::audio::Sound::spectrum_with_plot) is
/// the same whichever plot is used.
pub trait SpectrumPlot {
    /// Render one spectrum, `magnitudes` holding one vector per channel
    fn plot(&mut self, freqs: &[f64], magnitudes: &[Vec<f64>]) -> Result<()>;
}

/// Writes a spectrum as CSV rows of frequency and per-channel level in dB
pub struct CsvPlot<W: Write> {
    writer: W,
}

impl<W: Write> CsvPlot<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SpectrumPlot for CsvPlot<W> {
    fn plot(&mut self, freqs: &[f64], magnitudes: &[Vec<f64>]) -> Result<()> {
        let header: Vec<String> = (0..magnitudes.len()).map(|c| format!("ch{}", c)).collect();
        writeln!(self.writer, "frequency,{}", header.join(","))?;

        for (k, freq) in freqs.iter().enumerate() {
            let levels: Vec<String> = magnitudes
                .iter()
                .map(|ch| format!("{:.2}", linear_to_db(ch[k]).max(-200.0)))
                .collect();
            writeln!(self.writer, "{:.3},{}", freq, levels.join(","))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Sound;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_layout() {
        let sound = Sound::new(vec![vec![1.0, 0.0, 0.0, 0.0], vec![0.0; 4]], 4).unwrap();
        let mut plot = CsvPlot::new(Vec::new());
        sound.spectrum_with_plot(&mut plot).unwrap();

        let text = String::from_utf8(plot.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "frequency,ch0,ch1");
        assert_eq!(lines.len(), 1 + 3);
        assert_eq!(lines[1], "0.000,-12.04,-200.00");
    }

    #[test]
    fn test_plotting_does_not_change_the_spectrum() {
        let tone = Sound::tone(100.0, 1000usize, 1000).unwrap();
        let mut plot = CsvPlot::new(Vec::new());
        let shown = tone.spectrum_with_plot(&mut plot).unwrap();
        assert_eq!(shown, tone.spectrum());
    }
}
