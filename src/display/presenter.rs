use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::raster::{self, DecodeError};
use crate::storage::Storage;

use super::Canvas;

/// 21 columns by 6 rows on the 128x64 panel.
pub(super) const FONT: MonoFont<'static> = FONT_6X10;

/// The layouts the device shows: idle banner, now playing, or a picture.
#[derive(Debug, Clone)]
pub struct Presenter {
    idle_text: String,
    playing_header: String,
}

impl Presenter {
    pub fn new(idle_text: impl Into<String>, playing_header: impl Into<String>) -> Self {
        Self {
            idle_text: idle_text.into(),
            playing_header: playing_header.into(),
        }
    }

    /// Blank the panel, write `rows` top-down from the left edge and commit.
    /// Text past the right edge is clipped.
    pub fn show_rows<C: Canvas>(&self, canvas: &mut C, rows: &[&str]) {
        let style = MonoTextStyle::new(&FONT, BinaryColor::On);
        let line_height = FONT.character_size.height as i32;

        let Ok(()) = canvas.clear(BinaryColor::Off);
        for (i, row) in rows.iter().enumerate() {
            let top_left = Point::new(0, i as i32 * line_height);
            let Ok(_) = Text::with_baseline(row, top_left, style, Baseline::Top).draw(canvas);
        }
        canvas.flush();
    }

    pub fn show_idle<C: Canvas>(&self, canvas: &mut C) {
        self.show_rows(canvas, &[&self.idle_text]);
    }

    pub fn show_playing<C: Canvas>(&self, canvas: &mut C, title: &str) {
        self.show_rows(canvas, &[&self.playing_header, title]);
    }

    /// Blank the panel, draw the raster at `path` centred and commit.
    ///
    /// A read failure part-way through still commits what was drawn; header
    /// problems leave the panel as it was.
    pub fn draw_centered_bitmap<C: Canvas>(
        &self,
        canvas: &mut C,
        storage: &dyn Storage,
        path: &str,
    ) -> Result<(), DecodeError> {
        let mut stream = storage.open_for_read(path)?;
        let Ok(()) = canvas.clear(BinaryColor::Off);
        let result = raster::decode_and_draw(&mut stream, canvas);
        if matches!(result, Ok(()) | Err(DecodeError::Io(_))) {
            canvas.flush();
        }
        result
    }
}
