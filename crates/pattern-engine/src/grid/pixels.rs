//! The decoded source image.

use std::sync::Arc;

use crate::color::Rgb;
use crate::error::GridError;

use super::CellCoord;

/// An immutable RGBA8 pixel buffer, one pixel per grid cell.
///
/// Row-major, four bytes per pixel, alpha ignored. The buffer is shared
/// (`Arc`) so a session can retain it for label restoration without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Arc<[u8]>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Wrap an RGBA buffer of exactly `width * height * 4` bytes.
    ///
    /// # Errors
    ///
    /// [`GridError::LengthMismatch`] if the length is wrong.
    pub fn new(data: impl Into<Arc<[u8]>>, width: usize, height: usize) -> Result<Self, GridError> {
        let data = data.into();
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build an opaque buffer from RGB colors in row-major order.
    ///
    /// # Errors
    ///
    /// [`GridError::LengthMismatch`] if `colors.len() != width * height`.
    pub fn from_colors(colors: &[Rgb], width: usize, height: usize) -> Result<Self, GridError> {
        let data: Vec<u8> = colors
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, 255])
            .collect();
        Self::new(data, width, height)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Color of the pixel behind `coord`, or `None` outside the buffer.
    pub fn rgb_at(&self, coord: CellCoord) -> Option<Rgb> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        let offset = (coord.y * self.width + coord.x) * 4;
        Some(Rgb::from_rgba(&self.data[offset..offset + 4]))
    }

    /// All pixel colors in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data.chunks_exact(4).map(Rgb::from_rgba)
    }
}
