//! Palette selection: pick the most frequent catalog colors of an image and
//! hand out display labels.

use std::collections::{HashMap, HashSet};

use super::active::{ActiveColorMap, ColorAssignment};
use super::reference::ReferencePalette;
use crate::color::Rgb;
use crate::grid::PixelBuffer;

/// Number of labels written as plain digits before letters take over.
const DIGIT_LABELS: usize = 9;

/// Occurrence count per quantized color.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<Rgb, usize>,
}

impl FrequencyTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count already-quantized colors.
    pub fn from_quantized(colors: &[Rgb]) -> Self {
        let mut table = Self::new();
        for &color in colors {
            table.record(color);
        }
        table
    }

    /// Quantize every pixel against `palette` and count the results.
    pub fn from_pixels(pixels: &PixelBuffer, palette: &ReferencePalette) -> Self {
        let mut table = Self::new();
        for rgb in pixels.colors() {
            table.record(palette.nearest(rgb).rgb);
        }
        table
    }

    /// Count one occurrence of `color`.
    pub fn record(&mut self, color: Rgb) {
        *self.counts.entry(color).or_insert(0) += 1;
    }

    /// Occurrences of `color`.
    pub fn count(&self, color: Rgb) -> usize {
        self.counts.get(&color).copied().unwrap_or(0)
    }

    /// Number of distinct colors seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total number of recorded occurrences.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Colors ranked by count descending; equal counts keep catalog order.
    ///
    /// Colors missing from `palette` rank after every catalog color with the
    /// same count, ordered by value so the ranking stays deterministic.
    pub fn ranked(&self, palette: &ReferencePalette) -> Vec<(Rgb, usize)> {
        let catalog_order: HashMap<Rgb, usize> = palette
            .iter()
            .enumerate()
            .map(|(i, e)| (e.rgb, i))
            .collect();

        let mut ranked: Vec<(Rgb, usize)> = self.counts.iter().map(|(&c, &n)| (c, n)).collect();
        ranked.sort_by(|(a_rgb, a_count), (b_rgb, b_count)| {
            let a_pos = catalog_order.get(a_rgb).copied().unwrap_or(usize::MAX);
            let b_pos = catalog_order.get(b_rgb).copied().unwrap_or(usize::MAX);
            b_count
                .cmp(a_count)
                .then(a_pos.cmp(&b_pos))
                .then(a_rgb.cmp(b_rgb))
        });
        ranked
    }
}

/// Display label for the `n`-th selected color (1-based).
///
/// `1..=9` are written as digits; from the 10th color on, labels are
/// bijective base-26 letter codes: 10 → `"A"`, 35 → `"Z"`, 36 → `"AA"`.
///
/// # Example
///
/// ```
/// use pattern_engine::display_label;
///
/// assert_eq!(display_label(9), "9");
/// assert_eq!(display_label(10), "A");
/// assert_eq!(display_label(36), "AA");
/// ```
pub fn display_label(n: usize) -> String {
    if n <= DIGIT_LABELS {
        return n.to_string();
    }

    let mut remaining = n - DIGIT_LABELS;
    let mut letters = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        letters.push(b'A' + (remaining % 26) as u8);
        remaining /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Select at most `capacity` colors and assign display labels.
///
/// The `capacity` most frequent colors form the allowed set (ties broken by
/// catalog order). Labels are then handed out walking the catalog in its
/// fixed order, skipping colors outside the allowed set.
///
/// # Example
///
/// ```
/// use pattern_engine::{select_palette, FrequencyTable, ReferencePalette, Rgb};
///
/// let palette = ReferencePalette::from_hex(&[("R", "#FF0000"), ("B", "#0000FF")]).unwrap();
/// let red = Rgb::new(255, 0, 0);
/// let blue = Rgb::new(0, 0, 255);
/// let table = FrequencyTable::from_quantized(&[blue, blue, red]);
///
/// let colors = select_palette(&table, &palette, 2);
/// // Blue is more frequent, but red comes first in the catalog.
/// assert_eq!(colors.get(red).unwrap().label, "1");
/// assert_eq!(colors.get(blue).unwrap().label, "2");
/// ```
pub fn select_palette(
    frequencies: &FrequencyTable,
    palette: &ReferencePalette,
    capacity: usize,
) -> ActiveColorMap {
    let allowed: HashSet<Rgb> = frequencies
        .ranked(palette)
        .into_iter()
        .take(capacity)
        .map(|(color, _)| color)
        .collect();

    let mut colors = ActiveColorMap::new();
    for entry in palette.iter().filter(|e| allowed.contains(&e.rgb)) {
        colors.push(ColorAssignment {
            label: display_label(colors.len() + 1),
            id: entry.id.clone(),
            rgb: entry.rgb,
        });
    }

    tracing::debug!(
        distinct = frequencies.distinct(),
        capacity,
        selected = colors.len(),
        "Selected pattern palette"
    );

    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteEntry;
    use pretty_assertions::assert_eq;

    fn grey_palette(n: usize) -> ReferencePalette {
        let entries = (0..n)
            .map(|i| PaletteEntry::new(format!("g{i}"), Rgb::new(i as u8, i as u8, i as u8)))
            .collect();
        ReferencePalette::new(entries).unwrap()
    }

    #[test]
    fn test_display_label_digits() {
        let labels: Vec<String> = (1..=9).map(display_label).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn test_display_label_letters() {
        assert_eq!(display_label(10), "A");
        assert_eq!(display_label(11), "B");
        assert_eq!(display_label(35), "Z");
        assert_eq!(display_label(36), "AA");
        assert_eq!(display_label(37), "AB");
        assert_eq!(display_label(61), "AZ");
        assert_eq!(display_label(62), "BA");
        assert_eq!(display_label(9 + 26 + 26 * 26), "ZZ");
        assert_eq!(display_label(9 + 26 + 26 * 26 + 1), "AAA");
    }

    #[test]
    fn test_frequency_table_counts() {
        let a = Rgb::new(1, 1, 1);
        let b = Rgb::new(2, 2, 2);
        let table = FrequencyTable::from_quantized(&[a, b, a, a]);
        assert_eq!(table.count(a), 3);
        assert_eq!(table.count(b), 1);
        assert_eq!(table.count(Rgb::new(9, 9, 9)), 0);
        assert_eq!(table.distinct(), 2);
        assert_eq!(table.total(), 4);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_ranked_ties_use_catalog_order() {
        let palette = grey_palette(4);
        let table = FrequencyTable::from_quantized(&[
            Rgb::new(3, 3, 3),
            Rgb::new(1, 1, 1),
            Rgb::new(2, 2, 2),
            Rgb::new(2, 2, 2),
        ]);
        let ranked: Vec<Rgb> = table.ranked(&palette).into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            ranked,
            vec![Rgb::new(2, 2, 2), Rgb::new(1, 1, 1), Rgb::new(3, 3, 3)]
        );
    }

    #[test]
    fn test_select_caps_at_capacity() {
        let palette = grey_palette(5);
        let table = FrequencyTable::from_quantized(&[
            Rgb::new(4, 4, 4),
            Rgb::new(4, 4, 4),
            Rgb::new(4, 4, 4),
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            Rgb::new(2, 2, 2),
        ]);
        let colors = select_palette(&table, &palette, 2);
        assert_eq!(colors.len(), 2);
        // Top two are 4 and 0; labels follow catalog order.
        assert_eq!(colors.get(Rgb::new(0, 0, 0)).unwrap().label, "1");
        assert_eq!(colors.get(Rgb::new(4, 4, 4)).unwrap().label, "2");
        assert!(colors.get(Rgb::new(2, 2, 2)).is_none());
    }

    #[test]
    fn test_select_tie_at_cutoff_uses_catalog_order() {
        let palette = grey_palette(3);
        // All three colors appear once; capacity 2 keeps the first two in the catalog.
        let table = FrequencyTable::from_quantized(&[
            Rgb::new(2, 2, 2),
            Rgb::new(1, 1, 1),
            Rgb::new(0, 0, 0),
        ]);
        let colors = select_palette(&table, &palette, 2);
        let ids: Vec<&str> = colors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["g0", "g1"]);
    }

    #[test]
    fn test_select_eleven_colors_uses_letters() {
        let palette = grey_palette(11);
        let colors_in_image: Vec<Rgb> = (0..11u8).map(|i| Rgb::new(i, i, i)).collect();
        let table = FrequencyTable::from_quantized(&colors_in_image);
        let colors = select_palette(&table, &palette, 20);
        let labels: Vec<&str> = colors.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["1", "2", "3", "4", "5", "6", "7", "8", "9", "A", "B"]
        );
    }

    #[test]
    fn test_select_ignores_colors_outside_catalog() {
        let palette = grey_palette(2);
        let stranger = Rgb::new(200, 10, 10);
        let table = FrequencyTable::from_quantized(&[stranger, stranger, Rgb::new(1, 1, 1)]);
        let colors = select_palette(&table, &palette, 2);
        assert_eq!(colors.len(), 1);
        assert!(!colors.contains(stranger));
    }

    #[test]
    fn test_select_zero_capacity_is_empty() {
        let palette = grey_palette(2);
        let table = FrequencyTable::from_quantized(&[Rgb::new(1, 1, 1)]);
        assert!(select_palette(&table, &palette, 0).is_empty());
    }
}
