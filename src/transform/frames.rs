//! Overlapping analysis frames
//!
//! A [`FrameLayout`] fixes frame length, hop and frame count once; the
//! [`FrameTimes`] and [`Frames`] iterators both walk that layout, so a frame
//! and its time always refer to the same centre sample.

use std::f64::consts::PI;
use std::iter::FusedIterator;

use crate::audio::{Sound, Span};
use crate::error::{Result, SoundError};

/// Geometry of a framing: frames of `length` samples every `hop` samples
///
/// Only built through [`FrameLayout::new`], so hop and frame count always
/// follow from the frame length and the sound length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    /// Samples per frame
    length: usize,
    /// Samples between consecutive frame centres
    hop: usize,
    /// Number of frames, one per centre inside the sound
    n_frames: usize,
}

impl FrameLayout {
    /// Layout of `length`-sample frames over a sound of `n_samples`
    ///
    /// Frames overlap by half; frame `j` is centred on sample `j * hop` and
    /// there is one frame per centre inside the sound.
    pub fn new(length: usize, n_samples: usize) -> Result<Self> {
        if length == 0 {
            return Err(SoundError::invalid(
                "frame duration",
                0.0,
                "frames must be at least one sample long",
            ));
        }
        let hop = (length / 2).max(1);
        Ok(Self {
            length,
            hop,
            n_frames: n_samples.div_ceil(hop),
        })
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn hop(&self) -> usize {
        self.hop
    }

    #[inline]
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Centre sample of frame `j`
    #[inline]
    pub fn centre(&self, j: usize) -> usize {
        j * self.hop
    }

    /// Position of the centre sample within a frame
    #[inline]
    pub fn centre_offset(&self) -> usize {
        self.length / 2
    }

    /// Hann window peaking at exactly 1.0 on the centre offset
    pub fn window(&self) -> Vec<f64> {
        let offset = self.centre_offset() as f64;
        let length = self.length as f64;
        (0..self.length)
            .map(|pos| 0.5 * (1.0 + (2.0 * PI * (pos as f64 - offset) / length).cos()))
            .collect()
    }
}

/// Times in seconds of frame centres
///
/// Cloning an unstarted iterator gives an independent second pass.
#[derive(Debug, Clone)]
pub struct FrameTimes {
    layout: FrameLayout,
    samplerate: u32,
    next: usize,
}

impl Iterator for FrameTimes {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.layout.n_frames {
            return None;
        }
        let centre = self.layout.centre(self.next);
        self.next += 1;
        Some(centre as f64 / self.samplerate as f64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.layout.n_frames - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FrameTimes {}
impl FusedIterator for FrameTimes {}

/// Windowed frames of a sound, each a `Sound` of the frame length
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    sound: &'a Sound,
    layout: FrameLayout,
    window: Vec<f64>,
    next: usize,
}

impl Frames<'_> {
    pub fn layout(&self) -> FrameLayout {
        self.layout
    }
}

impl Iterator for Frames<'_> {
    type Item = Sound;

    fn next(&mut self) -> Option<Sound> {
        if self.next >= self.layout.n_frames {
            return None;
        }
        let centre = self.layout.centre(self.next);
        self.next += 1;

        let n = self.sound.n_samples();
        // Source index of frame position 0; negative means before the start.
        let start = centre as isize - self.layout.centre_offset() as isize;
        let channels = self
            .sound
            .channels()
            .iter()
            .map(|ch| {
                self.window
                    .iter()
                    .enumerate()
                    .map(|(pos, &w)| {
                        let index = start + pos as isize;
                        if index >= 0 && (index as usize) < n {
                            ch[index as usize] * w
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect();

        Some(Sound::from_parts(channels, self.sound.samplerate()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.layout.n_frames - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
impl FusedIterator for Frames<'_> {}

impl Sound {
    /// Frame geometry for frames of `duration`
    pub fn frame_layout(&self, duration: impl Into<Span>) -> Result<FrameLayout> {
        let length = duration.into().in_samples(self.samplerate())?;
        FrameLayout::new(length, self.n_samples())
    }

    /// Centre times of the frames produced by [`Sound::frames`]
    pub fn frametimes(&self, duration: impl Into<Span>) -> Result<FrameTimes> {
        Ok(FrameTimes {
            layout: self.frame_layout(duration)?,
            samplerate: self.samplerate(),
            next: 0,
        })
    }

    /// Half-overlapping, Hann-windowed frames of `duration`
    ///
    /// # Errors
    /// `InvalidParameter` for a zero-length frame.
    pub fn frames(&self, duration: impl Into<Span>) -> Result<Frames<'_>> {
        let layout = self.frame_layout(duration)?;
        Ok(Frames {
            sound: self,
            window: layout.window(),
            layout,
            next: 0,
        })
    }
}
