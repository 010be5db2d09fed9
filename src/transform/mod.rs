//! Operations that build new sounds from existing ones

mod concat;
mod frames;
mod ramp;

pub use concat::FadeShape;
pub use frames::{FrameLayout, FrameTimes, Frames};
pub use ramp::RampEdge;
