//! Fixed grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Grid dimensions, palette capacity and cell scale.
///
/// These are constants of a pattern: every generation produces a
/// `width x height` grid using at most `capacity` colors, and stage-local
/// pointer coordinates map to cells through `scale` pixels per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid width in cells (W)
    pub width: usize,
    /// Grid height in cells (H)
    pub height: usize,
    /// Maximum number of colors in one pattern (K)
    pub capacity: usize,
    /// Pixels per cell on the drawing stage
    pub scale: u32,
}

impl GridConfig {
    /// 70 x 100 cells, 20 colors, 9 px per cell.
    pub const DEFAULT: Self = Self {
        width: 70,
        height: 100,
        capacity: 20,
        scale: 9,
    };

    /// Create a configuration.
    pub fn new(width: usize, height: usize, capacity: usize, scale: u32) -> Self {
        Self {
            width,
            height,
            capacity,
            scale,
        }
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// [`GridError::ZeroDimension`], [`GridError::ZeroCapacity`] or
    /// [`GridError::ZeroScale`].
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width == 0 || self.height == 0 {
            return Err(GridError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.capacity == 0 {
            return Err(GridError::ZeroCapacity);
        }
        if self.scale == 0 {
            return Err(GridError::ZeroScale);
        }
        Ok(())
    }

    /// Number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Required RGBA pixel buffer length.
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.cell_count() * 4
    }

    /// Stage size in pixels (`width * scale`, `height * scale`).
    pub fn stage_size(&self) -> (u32, u32) {
        (
            self.width as u32 * self.scale,
            self.height as u32 * self.scale,
        )
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
