//! Reference palette (the bead catalog) and nearest-color matching.
//!
//! The reference palette is the fixed, ordered catalog of colors a pattern
//! can use. Catalog order matters twice: it breaks ties during nearest-color
//! search and it decides the order display labels are handed out in.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::PaletteError;
use crate::color::Rgb;

/// Anything that carries a color and can take part in nearest-color search.
pub trait Swatch {
    /// The color of this swatch.
    fn rgb(&self) -> Rgb;
}

impl Swatch for Rgb {
    #[inline]
    fn rgb(&self) -> Rgb {
        *self
    }
}

/// One catalog entry: an opaque picture number and its color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Catalog identifier ("picture number"), e.g. `"3713"` or `"B5200"`.
    pub id: String,
    /// Catalog color.
    pub rgb: Rgb,
}

impl PaletteEntry {
    /// Create a catalog entry.
    pub fn new(id: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            id: id.into(),
            rgb,
        }
    }
}

impl Swatch for PaletteEntry {
    #[inline]
    fn rgb(&self) -> Rgb {
        self.rgb
    }
}

/// Find the candidate closest to `color` by Euclidean RGB distance.
///
/// Candidates are scanned in order and replaced only on a strictly smaller
/// distance, so on exact ties the earliest candidate wins. Returns `None`
/// only when `candidates` is empty.
///
/// # Example
///
/// ```
/// use pattern_engine::{nearest_color, Rgb};
///
/// let candidates = [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
/// let nearest = nearest_color(Rgb::new(40, 40, 40), &candidates).unwrap();
/// assert_eq!(*nearest, Rgb::new(0, 0, 0));
/// ```
pub fn nearest_color<'a, S, I>(color: Rgb, candidates: I) -> Option<&'a S>
where
    S: Swatch + 'a,
    I: IntoIterator<Item = &'a S>,
{
    // Linear scan: catalogs hold a few hundred entries at most
    let mut best: Option<&'a S> = None;
    let mut best_dist = u32::MAX;

    for candidate in candidates {
        let dist = color.distance_squared(candidate.rgb());
        if dist < best_dist {
            best_dist = dist;
            best = Some(candidate);
        }
    }

    best
}

/// The ordered, validated reference palette.
///
/// Construction rejects empty catalogs, so [`nearest()`](Self::nearest)
/// always has an answer.
///
/// # Example
///
/// ```
/// use pattern_engine::{PaletteEntry, ReferencePalette, Rgb};
///
/// let palette = ReferencePalette::new(vec![
///     PaletteEntry::new("R", Rgb::new(255, 0, 0)),
///     PaletteEntry::new("B", Rgb::new(0, 0, 255)),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.nearest(Rgb::new(200, 10, 10)).id, "R");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencePalette {
    entries: Vec<PaletteEntry>,
}

impl ReferencePalette {
    /// Validate and wrap a catalog.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `entries` is empty
    /// - [`PaletteError::DuplicateColor`] if two entries share a color
    /// - [`PaletteError::DuplicateId`] if two entries share an id
    pub fn new(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }

        let mut seen_colors = HashSet::new();
        let mut seen_ids = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if !seen_colors.insert(entry.rgb) {
                return Err(PaletteError::DuplicateColor { index });
            }
            if !seen_ids.insert(entry.id.as_str()) {
                return Err(PaletteError::DuplicateId {
                    index,
                    id: entry.id.clone(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Build a catalog from `(id, hex color)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any color is invalid, or any
    /// error from [`new()`](Self::new).
    pub fn from_hex(entries: &[(&str, &str)]) -> Result<Self, PaletteError> {
        let parsed = entries
            .iter()
            .map(|(id, hex)| -> Result<PaletteEntry, PaletteError> {
                Ok(PaletteEntry::new(*id, hex.parse::<Rgb>()?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Number of catalog entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: empty catalogs are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalog entries in catalog order.
    #[inline]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Catalog entry at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    /// Position of the entry with this exact color.
    pub fn position(&self, rgb: Rgb) -> Option<usize> {
        self.entries.iter().position(|e| e.rgb == rgb)
    }

    /// Nearest catalog entry to `color` (earliest entry wins ties).
    #[inline]
    pub fn nearest(&self, color: Rgb) -> &PaletteEntry {
        nearest_color(color, &self.entries).unwrap_or(&self.entries[0])
    }
}

impl<'a> IntoIterator for &'a ReferencePalette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
