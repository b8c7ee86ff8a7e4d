//! Display collaborator: a small monochrome panel plus the presentations
//! the player puts on it.
//!
//! `FrameBuffer` is the in-memory canvas the terminal UI renders;
//! `Presenter` knows the idle, now-playing and picture layouts.

mod framebuffer;
mod presenter;

pub use framebuffer::{Frame, FrameBuffer};
pub use presenter::Presenter;

use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// A monochrome panel. Drawing lands in panel RAM; nothing is visible until
/// `flush` pushes it to the glass.
pub trait Canvas: DrawTarget<Color = BinaryColor, Error = Infallible> + OriginDimensions {
    fn flush(&mut self);
}
