//! Grid errors and the unified error type of the crate.
//!
//! [`PatternError`] wraps every error the crate can produce for convenient
//! `?` propagation in application code.

use thiserror::Error;

use crate::palette::{PaletteError, ParseColorError};

/// Invalid grid input or configuration.
///
/// Raised before any session state is touched, so a rejected generation
/// leaves the previous pattern intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Pixel buffer length does not equal `width * height * 4`
    #[error("pixel buffer has {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    LengthMismatch {
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
        /// Required buffer length
        expected: usize,
        /// Supplied buffer length
        actual: usize,
    },
    /// Pixel buffer dimensions differ from the configured grid
    #[error("pixel buffer is {actual_width}x{actual_height}, grid is {width}x{height}")]
    DimensionMismatch {
        /// Configured grid width
        width: usize,
        /// Configured grid height
        height: usize,
        /// Buffer width
        actual_width: usize,
        /// Buffer height
        actual_height: usize,
    },
    /// Grid width or height is zero
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// Configured width
        width: usize,
        /// Configured height
        height: usize,
    },
    /// Palette capacity is zero
    #[error("palette capacity must be at least 1")]
    ZeroCapacity,
    /// Cell scale is zero
    #[error("cell scale must be at least 1 pixel")]
    ZeroScale,
}

/// Unified error type for the pattern-engine public API.
///
/// # Example
///
/// ```
/// use pattern_engine::{PatternError, ReferencePalette};
///
/// fn catalog() -> Result<ReferencePalette, PatternError> {
///     let palette = ReferencePalette::from_hex(&[("310", "#000000"), ("B5200", "#FFFFFF")])?;
///     Ok(palette)
/// }
/// # assert_eq!(catalog().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Reference palette validation error
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// Color parsing error (invalid hex string)
    #[error("color parse error: {0}")]
    ParseColor(#[from] ParseColorError),
    /// Pixel buffer or grid configuration error
    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}
