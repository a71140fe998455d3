//! The active color map: the colors selected for one generated pattern.

use std::collections::HashMap;

use serde::Serialize;

use super::reference::{nearest_color, Swatch};
use crate::color::Rgb;
use crate::grid::Grid;

/// A catalog color chosen for the current pattern, with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ColorAssignment {
    /// Short symbol drawn in the cells ("1".."9", "A", "B", ...).
    pub label: String,
    /// Catalog id ("picture number") of the color.
    pub id: String,
    /// The catalog color.
    pub rgb: Rgb,
}

impl Swatch for ColorAssignment {
    #[inline]
    fn rgb(&self) -> Rgb {
        self.rgb
    }
}

/// One legend row: an assignment plus how many cells show its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Display label.
    pub label: String,
    /// Catalog id.
    pub id: String,
    /// Catalog color.
    pub rgb: Rgb,
    /// Number of cells currently showing this label.
    pub count: usize,
}

/// Mapping from quantized color to its [`ColorAssignment`].
///
/// Built once per pattern generation by
/// [`select_palette()`](super::select_palette) and replaced wholesale by the
/// next generation. Assignments are kept in label order, which is also
/// catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveColorMap {
    assignments: Vec<ColorAssignment>,
    index: HashMap<Rgb, usize>,
}

impl ActiveColorMap {
    /// An empty map (no pattern generated yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assignment. The caller guarantees colors are distinct.
    pub(crate) fn push(&mut self, assignment: ColorAssignment) {
        debug_assert!(
            !self.index.contains_key(&assignment.rgb),
            "color {} assigned twice",
            assignment.rgb
        );
        self.index.insert(assignment.rgb, self.assignments.len());
        self.assignments.push(assignment);
    }

    /// Number of selected colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True when no colors are selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignment for an exact quantized color.
    pub fn get(&self, rgb: Rgb) -> Option<&ColorAssignment> {
        self.index.get(&rgb).map(|&i| &self.assignments[i])
    }

    /// True if `rgb` is one of the selected colors.
    pub fn contains(&self, rgb: Rgb) -> bool {
        self.index.contains_key(&rgb)
    }

    /// Assignment carrying a given display label.
    pub fn by_label(&self, label: &str) -> Option<&ColorAssignment> {
        self.assignments.iter().find(|a| a.label == label)
    }

    /// Assignments in label order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColorAssignment> {
        self.assignments.iter()
    }

    /// The selected colors in label order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.assignments.iter().map(|a| a.rgb)
    }

    /// Nearest selected color to `rgb`, searching only this map.
    ///
    /// Ties resolve to the assignment with the lowest label. Returns `None`
    /// only for an empty map.
    pub fn nearest_assignment(&self, rgb: Rgb) -> Option<&ColorAssignment> {
        nearest_color(rgb, &self.assignments)
    }

    /// Legend rows in label order, with visible-label counts from `grid`.
    pub fn legend(&self, grid: &Grid) -> Vec<LegendEntry> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for cell in grid.iter().filter(|c| c.label_visible()) {
            if let Some(label) = cell.label() {
                *counts.entry(label).or_insert(0) += 1;
            }
        }

        self.assignments
            .iter()
            .map(|a| LegendEntry {
                label: a.label.clone(),
                id: a.id.clone(),
                rgb: a.rgb,
                count: counts.get(a.label.as_str()).copied().unwrap_or(0),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ActiveColorMap {
    type Item = &'a ColorAssignment;
    type IntoIter = std::slice::Iter<'a, ColorAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}
