//! Error types for palette operations
//!
//! This module provides error types for color parsing and reference palette
//! validation.

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0:?}")]
    InvalidHex(char),
}

/// Error type for reference palette validation.
///
/// The reference palette is configuration data; it must be non-empty for
/// nearest-color matching to be defined and its colors and ids must be unique
/// so every catalog entry is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// No colors provided in palette
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// Duplicate color found at the specified index
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    /// Duplicate catalog id found at the specified index
    #[error("duplicate catalog id {id:?} at index {index}")]
    DuplicateId {
        /// Index where the duplicate was found
        index: usize,
        /// The repeated id
        id: String,
    },
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
