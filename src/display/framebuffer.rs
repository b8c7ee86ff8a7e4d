use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use super::Canvas;

/// A committed picture: what the panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    size: Size,
    pixels: Vec<BinaryColor>,
}

impl Frame {
    fn blank(size: Size) -> Self {
        Self {
            size,
            pixels: vec![BinaryColor::Off; (size.width * size.height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    fn index(&self, point: Point) -> Option<usize> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        (x < self.size.width && y < self.size.height).then(|| (y * self.size.width + x) as usize)
    }

    /// Whether `(x, y)` is lit; out-of-bounds reads as off.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) else {
            return false;
        };
        self.index(Point::new(x, y))
            .is_some_and(|i| self.pixels[i].is_on())
    }

    #[cfg(test)]
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_on()).count()
    }
}

/// Double-buffered panel emulator: embedded-graphics draws into the back
/// buffer and `flush` commits it, the way a panel driver pushes its RAM to
/// the glass.
pub struct FrameBuffer {
    back: Frame,
    front: Frame,
    flushes: u64,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = Size::new(width, height);
        Self {
            back: Frame::blank(size),
            front: Frame::blank(size),
            flushes: 0,
        }
    }

    /// The last committed frame.
    pub fn frame(&self) -> &Frame {
        &self.front
    }

    /// Number of commits so far.
    pub fn flushes(&self) -> u64 {
        self.flushes
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        self.back.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    /// Out-of-bounds pixels are dropped.
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.back.index(point) {
                self.back.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.back.pixels.fill(color);
        Ok(())
    }
}

impl Canvas for FrameBuffer {
    fn flush(&mut self) {
        self.front = self.back.clone();
        self.flushes += 1;
    }
}
