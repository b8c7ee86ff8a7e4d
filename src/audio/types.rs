//! Audio-related small types.
//!
//! This module defines the output volume scale, the output pin assignment
//! and the events an output reports back to the control loop.

use std::fmt;

use serde::Deserialize;

/// Output volume on the device's 22-step scale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    pub const MIN: Volume = Volume(0);
    pub const MAX: Volume = Volume(21);

    /// Build a volume, saturating anything outside `[MIN, MAX]`.
    pub fn clamped(raw: i64) -> Self {
        Self(raw.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// One step louder, or `None` at the ceiling.
    pub fn incremented(self) -> Option<Self> {
        (self < Self::MAX).then(|| Self(self.0 + 1))
    }

    /// One step quieter, or `None` at the floor.
    pub fn decremented(self) -> Option<Self> {
        (self > Self::MIN).then(|| Self(self.0 - 1))
    }

    /// Linear gain in `0.0..=1.0`.
    pub fn gain(self) -> f32 {
        self.level() as f32 / Self::MAX.level() as f32
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(10)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX.0)
    }
}

/// I2S pin assignment for hardware outputs.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub struct Pinout {
    pub bclk: u8,
    pub lrclk: u8,
    pub dout: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// The current stream reached its natural end.
    Finished { path: String },
}
