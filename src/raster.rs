//! Monochrome raster decoder.
//!
//! Decodes 1-bit-per-pixel bitmaps (the `BM` file format) straight onto a
//! fixed-size draw target, centred. Ink is stored as `0` bits, background as
//! `1` bits; background pixels are left untouched. Nothing is cached: the
//! byte stream is read once, row by row.

use std::convert::Infallible;
use std::io::{self, Read, Seek, SeekFrom};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use thiserror::Error;

/// `"BM"` read as a little-endian `u16`.
pub const SIGNATURE: u16 = 0x4D42;

const DATA_OFFSET_AT: u64 = 10;
const WIDTH_AT: u64 = 18;
const HEIGHT_AT: u64 = 22;
const BIT_DEPTH_AT: u64 = 28;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("bad raster signature 0x{0:04X}")]
    BadSignature(u16),

    #[error("invalid raster dimensions {width}x{height} (max {max_width}x{max_height})")]
    InvalidDimensions {
        width: i32,
        height: i32,
        max_width: u32,
        max_height: u32,
    },

    #[error("only 1-bit rasters are supported, got {0}-bit")]
    UnsupportedDepth(u16),

    #[error("raster read failed: {0}")]
    Io(#[from] io::Error),
}

/// The header fields the decoder needs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RasterHeader {
    pub data_offset: u32,
    pub width: i32,
    pub height: i32,
    pub bit_depth: u16,
}

impl RasterHeader {
    /// Read and signature-check the header. Leaves the stream position
    /// unspecified.
    pub fn read<R: Read + Seek + ?Sized>(stream: &mut R) -> Result<Self, DecodeError> {
        let signature = u16::from_le_bytes(read_at(stream, 0)?);
        if signature != SIGNATURE {
            return Err(DecodeError::BadSignature(signature));
        }

        Ok(Self {
            data_offset: u32::from_le_bytes(read_at(stream, DATA_OFFSET_AT)?),
            width: i32::from_le_bytes(read_at(stream, WIDTH_AT)?),
            height: i32::from_le_bytes(read_at(stream, HEIGHT_AT)?),
            bit_depth: u16::from_le_bytes(read_at(stream, BIT_DEPTH_AT)?),
        })
    }

    /// Check the raster fits a `max_width` x `max_height` surface and is
    /// 1-bit. Returns the dimensions as unsigned values.
    pub fn validate(&self, max_width: u32, max_height: u32) -> Result<(u32, u32), DecodeError> {
        let fits = |v: i32, max: u32| v > 0 && v as u32 <= max;
        if !fits(self.width, max_width) || !fits(self.height, max_height) {
            return Err(DecodeError::InvalidDimensions {
                width: self.width,
                height: self.height,
                max_width,
                max_height,
            });
        }
        if self.bit_depth != 1 {
            return Err(DecodeError::UnsupportedDepth(self.bit_depth));
        }
        Ok((self.width as u32, self.height as u32))
    }
}

fn read_at<R: Read + Seek + ?Sized, const N: usize>(
    stream: &mut R,
    offset: u64,
) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    stream.seek(SeekFrom::Start(offset))?;
    stream.read_exact(&mut buf)?;
    Ok(buf)
}

/// Decode the raster in `stream` onto `target`, centred.
///
/// Each stored row is handed to the target as one batch of `On` pixels.
/// Errors leave already drawn rows in place; committing them is up to the
/// caller.
pub fn decode_and_draw<R, D>(stream: &mut R, target: &mut D) -> Result<(), DecodeError>
where
    R: Read + Seek + ?Sized,
    D: DrawTarget<Color = BinaryColor, Error = Infallible> + OriginDimensions,
{
    let Size {
        width: max_width,
        height: max_height,
    } = target.size();
    let header = RasterHeader::read(stream)?;
    let (width, height) = header.validate(max_width, max_height)?;

    let x0 = ((max_width - width) / 2) as i32;
    let y0 = ((max_height - height) / 2) as i32;

    // Rows are bit-packed MSB first and padded to 4-byte multiples.
    let packed_row_bytes = width.div_ceil(8) as usize;
    let padded_row_bytes = width.div_ceil(32) as usize * 4;
    let padding = (padded_row_bytes - packed_row_bytes) as i64;

    stream.seek(SeekFrom::Start(u64::from(header.data_offset)))?;

    let mut row_buf = vec![0u8; packed_row_bytes];
    // Stored bottom row first.
    for row in (0..height as i32).rev() {
        stream.read_exact(&mut row_buf)?;
        let ink = (0..width as i32)
            .filter(|col| row_buf[(col / 8) as usize] & (0x80u8 >> (col % 8)) == 0)
            .map(|col| Pixel(Point::new(x0 + col, y0 + row), BinaryColor::On));
        let Ok(()) = target.draw_iter(ink);
        if padding > 0 {
            stream.seek(SeekFrom::Current(padding))?;
        }
    }

    Ok(())
}
