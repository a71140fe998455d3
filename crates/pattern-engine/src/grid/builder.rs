//! Pattern grid construction.
//!
//! Generation runs in three steps over the same pixel buffer:
//!
//! ```text
//! PixelBuffer ──quantize──> catalog color per cell
//!                              │
//!                              ├──> FrequencyTable ──select_palette──> ActiveColorMap
//!                              │                                          │
//!                              └──────────────build cells<────────────────┘
//! ```
//!
//! A cell whose catalog color did not make the top-K cut keeps its raw pixel
//! color and becomes an unlabelled background cell.

use serde::Serialize;

use super::cell::{Cell, CellCoord};
use super::pixels::PixelBuffer;
use crate::color::Rgb;
use crate::palette::{select_palette, ActiveColorMap, FrequencyTable, ReferencePalette};

/// The `height x width` cell grid of one pattern, stored row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A 0x0 grid (no pattern generated yet).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for the 0x0 grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if `coord` lies inside the grid.
    #[inline]
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Cell at `coord`.
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        if self.contains(coord) {
            self.cells.get(coord.y * self.width + coord.x)
        } else {
            None
        }
    }

    /// Cell at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cell(CellCoord::new(x, y))
    }

    pub(crate) fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        if self.contains(coord) {
            self.cells.get_mut(coord.y * self.width + coord.x)
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on 0, and an empty grid has no rows anyway
        self.cells.chunks(self.width.max(1))
    }

    /// Number of background (label hidden) cells.
    pub fn background_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_background()).count()
    }

    /// Number of cells currently showing `label`.
    pub fn label_count(&self, label: &str) -> usize {
        self.cells
            .iter()
            .filter(|c| c.visible_label() == Some(label))
            .count()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Quantize every pixel to its nearest catalog color, row-major.
pub fn quantize(pixels: &PixelBuffer, palette: &ReferencePalette) -> Vec<Rgb> {
    pixels.colors().map(|rgb| palette.nearest(rgb).rgb).collect()
}

/// Build the cell grid for `pixels` using an already selected color map.
///
/// Each pixel is quantized against the full reference palette; if the
/// resulting catalog color is in `colors` the cell shows its label,
/// otherwise the cell keeps the raw pixel color as a background cell.
pub fn build_grid(pixels: &PixelBuffer, palette: &ReferencePalette, colors: &ActiveColorMap) -> Grid {
    let quantized = quantize(pixels, palette);
    build_from_quantized(pixels, &quantized, colors)
}

fn build_from_quantized(pixels: &PixelBuffer, quantized: &[Rgb], colors: &ActiveColorMap) -> Grid {
    let width = pixels.width();
    let height = pixels.height();

    let cells = pixels
        .colors()
        .zip(quantized)
        .enumerate()
        .map(|(i, (raw, &candidate))| {
            let coord = CellCoord::new(i % width, i / width);
            match colors.get(candidate) {
                Some(assignment) => Cell::labelled(coord, assignment),
                None => Cell::background(coord, raw),
            }
        })
        .collect();

    Grid {
        width,
        height,
        cells,
    }
}

/// Result of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// The cell grid.
    pub grid: Grid,
    /// Colors selected for the grid.
    pub colors: ActiveColorMap,
    /// The source pixels, retained for label restoration.
    pub pixels: PixelBuffer,
}

/// Run a full generation: quantize, select at most `capacity` colors, build
/// the grid.
///
/// Deterministic: the same pixels, palette and capacity always produce an
/// identical grid and color map.
///
/// # Example
///
/// ```
/// use pattern_engine::{generate_pattern, PixelBuffer, ReferencePalette, Rgb};
///
/// let palette = ReferencePalette::from_hex(&[("R", "#FF0000"), ("B", "#0000FF")]).unwrap();
/// let red = Rgb::new(250, 5, 5);
/// let blue = Rgb::new(0, 0, 250);
/// let pixels = PixelBuffer::from_colors(&[red, red, blue, red], 2, 2).unwrap();
///
/// let pattern = generate_pattern(pixels, &palette, 2);
/// assert_eq!(pattern.colors.len(), 2);
/// assert_eq!(pattern.grid.get(0, 1).unwrap().label(), Some("2"));
/// ```
pub fn generate_pattern(pixels: PixelBuffer, palette: &ReferencePalette, capacity: usize) -> Pattern {
    let quantized = quantize(&pixels, palette);
    let frequencies = FrequencyTable::from_quantized(&quantized);
    let colors = select_palette(&frequencies, palette, capacity);
    let grid = build_from_quantized(&pixels, &quantized, &colors);

    tracing::info!(
        width = grid.width(),
        height = grid.height(),
        distinct = frequencies.distinct(),
        colors = colors.len(),
        background = grid.background_count(),
        "Pattern generated"
    );

    Pattern {
        grid,
        colors,
        pixels,
    }
}
