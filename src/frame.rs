use std::io::{self, Write};
use std::ops::Range;

use thiserror::Error;

use crate::color::Rgb;
use crate::mapping::{CoordinateMapper, MatrixGeometry};

/// Prefix of every frame line on the serial console.
pub const FRAME_PREFIX: &str = "FRAME:";

/// Pixel buffer for one LED panel, stored in physical (wiring) order.
///
/// Callers address pixels by logical position; the buffer resolves them
/// through its [`CoordinateMapper`], so out-of-range coordinates clamp the
/// same way the mapper does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    mapper: CoordinateMapper,
    pixels: Vec<Rgb>,
}

impl FrameBuffer {
    /// Create an all-black buffer sized for `mapper`.
    pub fn new(mapper: CoordinateMapper) -> Self {
        Self {
            mapper,
            pixels: vec![Rgb::default(); mapper.len()],
        }
    }

    #[inline]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[self.mapper.map_position(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        let index = self.mapper.map_position(x, y);
        self.pixels[index] = color;
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    pub fn clear(&mut self) {
        self.fill(Rgb::default());
    }

    /// Pixels in the order they are shifted out to the strip.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixels in strip order, for writing a prepared strip buffer directly.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    /// Pixels in logical row-major order, top row first.
    pub fn logical_pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        let geometry = self.mapper.geometry();
        (0..geometry.height())
            .flat_map(move |y| (0..geometry.width()).map(move |x| self.get(x, y)))
    }
}

/// Render a frame as a single `FRAME:RRGGBB,RRGGBB,...,` line.
///
/// Pixels appear in logical row-major order and every pixel, including the
/// last, is followed by a comma. No line terminator is appended.
pub fn encode_frame(frame: &FrameBuffer) -> String {
    let mut line = String::with_capacity(FRAME_PREFIX.len() + frame.pixels().len() * 7);
    line.push_str(FRAME_PREFIX);
    for color in frame.logical_pixels() {
        line.push_str(&color.to_string());
        line.push(',');
    }
    line
}

/// Streams encoded frames to a serial console or any other writer.
#[derive(Debug)]
pub struct FrameWriter<W> {
    inner: W,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write one frame followed by a newline and flush it out.
    pub fn write_frame(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        writeln!(self.inner, "{}", encode_frame(frame))?;
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Error when decoding a frame line captured from the serial console.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameParseError {
    #[error("line does not start with 'FRAME:'")]
    MissingPrefix,

    #[error("invalid pixel '{value}' at position {position}")]
    InvalidPixel { position: usize, value: String },

    #[error("expected {expected} pixels, found {found}")]
    WrongPixelCount { expected: usize, found: usize },
}

/// Decode a `FRAME:` line into pixels in logical row-major order.
///
/// Surrounding whitespace is ignored and the trailing comma is optional.
/// The line must carry exactly one pixel per LED of `geometry`.
pub fn parse_frame(line: &str, geometry: MatrixGeometry) -> Result<Vec<Rgb>, FrameParseError> {
    let body = line
        .trim()
        .strip_prefix(FRAME_PREFIX)
        .ok_or(FrameParseError::MissingPrefix)?;
    let body = body.strip_suffix(',').unwrap_or(body);

    let pixels = if body.is_empty() {
        Vec::new()
    } else {
        body.split(',')
            .enumerate()
            .map(|(position, value)| {
                parse_pixel(value).ok_or_else(|| FrameParseError::InvalidPixel {
                    position,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    let expected = geometry.len();
    if pixels.len() != expected {
        return Err(FrameParseError::WrongPixelCount {
            expected,
            found: pixels.len(),
        });
    }
    Ok(pixels)
}

fn parse_pixel(value: &str) -> Option<Rgb> {
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: Range<usize>| u8::from_str_radix(&value[range], 16).ok();
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
