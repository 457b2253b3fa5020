//! Raster surfaces that grid state is drawn onto.

use crate::{Color, PixelRect};

/// Write-only raster target.
///
/// Rectangles extending past the surface edges are clipped.
pub trait Surface {
    /// Width of the surface in pixels.
    fn width(&self) -> u32;

    /// Height of the surface in pixels.
    fn height(&self) -> u32;

    /// Resets every pixel to the provided color.
    fn clear(&mut self, color: Color);

    /// Fills the rectangle with the provided color.
    fn fill_rect(&mut self, rect: PixelRect, color: Color);
}

/// In-memory RGBA surface stored row-major, four bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a transparent surface of the provided dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            bytes: vec![0; len],
        }
    }

    /// Color stored at the provided pixel, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = self.offset(x, y);
        let rgba = self.bytes.get(offset..offset + 4)?;
        Some(Color::new(rgba[0], rgba[1], rgba[2], rgba[3]))
    }

    /// Raw RGBA bytes suitable for uploading into a texture.
    #[must_use]
    pub fn as_rgba8(&self) -> &[u8] {
        &self.bytes
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for pixel in self.bytes.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let x_end = rect.x.saturating_add(rect.width).min(self.width);
        let y_end = rect.y.saturating_add(rect.height).min(self.height);
        if rect.x >= x_end || rect.y >= y_end {
            return;
        }

        let rgba = color.to_rgba8();
        for y in rect.y..y_end {
            let start = self.offset(rect.x, y);
            let end = self.offset(x_end, y);
            for pixel in self.bytes[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&rgba);
            }
        }
    }
}
