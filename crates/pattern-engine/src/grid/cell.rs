//! Grid cells and their coordinates.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::color::{Rgb, TextTone};
use crate::palette::ColorAssignment;

/// Integer cell coordinates, `x` in `0..W`, `y` in `0..H`.
///
/// Ordered row-major (by `y`, then `x`), so sets of coordinates iterate the
/// way the grid is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellCoord {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl CellCoord {
    /// Create a coordinate.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Ord for CellCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for CellCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One grid position: fill color, optional label and the background flag.
///
/// Only semantic state lives here; drawing is left to whoever renders the
/// grid. A background cell never shows its label, even when label text is
/// retained, so `is_background() == !label_visible()` holds for every cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    coord: CellCoord,
    fill: Rgb,
    label: Option<String>,
    tone: TextTone,
    background: bool,
}

impl Cell {
    /// A labelled cell showing `assignment`.
    pub(crate) fn labelled(coord: CellCoord, assignment: &ColorAssignment) -> Self {
        Self {
            coord,
            fill: assignment.rgb,
            label: Some(assignment.label.clone()),
            tone: assignment.rgb.text_tone(),
            background: false,
        }
    }

    /// An unlabelled background cell showing the raw pixel color.
    pub(crate) fn background(coord: CellCoord, raw: Rgb) -> Self {
        Self {
            coord,
            fill: raw,
            label: None,
            tone: raw.text_tone(),
            background: true,
        }
    }

    /// Position in the grid.
    #[inline]
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Fill color.
    #[inline]
    pub fn fill(&self) -> Rgb {
        self.fill
    }

    /// Label text, retained even while hidden.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Tone the label is drawn in.
    #[inline]
    pub fn tone(&self) -> TextTone {
        self.tone
    }

    /// True when the label is suppressed.
    #[inline]
    pub fn is_background(&self) -> bool {
        self.background
    }

    /// True when the label should be drawn.
    #[inline]
    pub fn label_visible(&self) -> bool {
        !self.background && self.label.is_some()
    }

    /// Label to draw, if visible.
    pub fn visible_label(&self) -> Option<&str> {
        if self.label_visible() {
            self.label()
        } else {
            None
        }
    }

    /// Suppress the label, keeping text and fill. Returns whether it changed.
    pub(crate) fn hide_label(&mut self) -> bool {
        let changed = !self.background;
        self.background = true;
        changed
    }

    /// Show `assignment`: fill, label and tone all follow it.
    pub(crate) fn show(&mut self, assignment: &ColorAssignment) {
        self.fill = assignment.rgb;
        self.label = Some(assignment.label.clone());
        self.tone = assignment.rgb.text_tone();
        self.background = false;
    }
}
