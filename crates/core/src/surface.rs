//! Drawing surface abstraction and an in-memory RGBA implementation.
//!
//! A [`Surface`] is the one shared mutable resource of the picker: shapes read
//! pixel blocks back from it to resolve colors and write pixel blocks to it to
//! render themselves. [`PixelSurface`] keeps the pixels in a row-major RGBA8
//! buffer that can be handed to an image encoder or a browser `ImageData`.

use glam::DVec2;

use crate::color::Rgb;
use crate::error::PickerError;

/// A rectangular block of RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl ImageData {
    /// Creates a fully transparent block.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the pixel at block-local `(x, y)`.
    ///
    /// Panics if the coordinate lies outside the block.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrites the pixel at block-local `(x, y)`.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * self.width + x) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }
}

/// Stroke style for circle outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub line_width: f64,
}

/// A 2D pixel surface the picker renders onto.
///
/// Coordinates are in surface pixels with the origin at the top-left. Block
/// reads that extend past the edges yield transparent black for the missing
/// pixels; block writes are clipped to the surface.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> usize;

    /// Surface height in pixels.
    fn height(&self) -> usize;

    /// Reads a `width` x `height` block whose top-left is at `(x, y)`.
    fn get_image_data(&self, x: i64, y: i64, width: usize, height: usize) -> ImageData;

    /// Writes a block with its top-left at `(x, y)`.
    fn put_image_data(&mut self, data: &ImageData, x: i64, y: i64);

    /// Strokes a circle outline of the given radius around `center`.
    fn stroke_circle(&mut self, center: DVec2, radius: f64, stroke: Stroke);
}

/// In-memory RGBA8 surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Creates a transparent surface.
    ///
    /// Returns `PickerError::InvalidDimensions` if either dimension is zero or
    /// the buffer size would overflow `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, PickerError> {
        if width == 0 || height == 0 {
            return Err(PickerError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(PickerError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// The raw RGBA buffer.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Clears the surface to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((y * self.width + x) * 4)
    }

    /// Composites `color` with alpha `coverage` over the pixel at `i` (source-over).
    fn blend(&mut self, i: usize, color: Rgb, coverage: f64) {
        let dst_a = self.pixels[i + 3] as f64 / 255.0;
        let out_a = coverage + dst_a * (1.0 - coverage);
        if out_a <= 0.0 {
            return;
        }
        for (k, src) in color.to_array().into_iter().enumerate() {
            let dst = self.pixels[i + k] as f64;
            let mixed = (src as f64 * coverage + dst * dst_a * (1.0 - coverage)) / out_a;
            self.pixels[i + k] = mixed.round().clamp(0.0, 255.0) as u8;
        }
        self.pixels[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_image_data(&self, x: i64, y: i64, width: usize, height: usize) -> ImageData {
        let mut block = ImageData::new(width, height);
        for row in 0..height {
            for col in 0..width {
                if let Some(rgba) = self.pixel(x + col as i64, y + row as i64) {
                    block.set_pixel(col, row, rgba);
                }
            }
        }
        block
    }

    fn put_image_data(&mut self, data: &ImageData, x: i64, y: i64) {
        for row in 0..data.height() {
            for col in 0..data.width() {
                if let Some(i) = self.offset(x + col as i64, y + row as i64) {
                    self.pixels[i..i + 4].copy_from_slice(&data.pixel(col, row));
                }
            }
        }
    }

    /// Anti-aliased outline: a pixel's coverage falls off linearly over the
    /// half-pixel on either side of the stroke band.
    fn stroke_circle(&mut self, center: DVec2, radius: f64, stroke: Stroke) {
        let half = stroke.line_width / 2.0;
        let reach = radius + half + 1.0;
        let x0 = (center.x - reach).floor().max(0.0) as usize;
        let y0 = (center.y - reach).floor().max(0.0) as usize;
        let x1 = ((center.x + reach).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((center.y + reach).ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let d = pixel_center.distance(center);
                let coverage = (half + 0.5 - (d - radius).abs()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let i = (y * self.width + x) * 4;
                    self.blend(i, stroke.color, coverage);
                }
            }
        }
    }
}
