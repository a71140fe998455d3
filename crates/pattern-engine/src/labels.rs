//! Bulk label toggling over a selection.

use crate::grid::{CellCoord, Grid, PixelBuffer};
use crate::palette::ActiveColorMap;
use crate::selection::SelectionSet;

/// Hide the labels of every selected cell.
///
/// Cells become background cells; label text and fill are kept. Returns the
/// coordinates whose visibility actually changed, in row-major order.
pub fn hide_labels(grid: &mut Grid, selection: &SelectionSet) -> Vec<CellCoord> {
    selection
        .iter()
        .filter(|&coord| grid.cell_mut(coord).is_some_and(|cell| cell.hide_label()))
        .collect()
}

/// Recompute and show labels for every selected background cell.
///
/// The cell's source pixel is matched against the colors of `colors` only
/// (not the full catalog), and fill, label and tone follow the match. A cell
/// with no match is left unchanged. Cells that already show a label are
/// skipped. Returns the coordinates that were updated, in row-major order.
pub fn restore_labels(
    grid: &mut Grid,
    selection: &SelectionSet,
    colors: &ActiveColorMap,
    pixels: &PixelBuffer,
) -> Vec<CellCoord> {
    let mut updated = Vec::new();

    for coord in selection.iter() {
        let Some(cell) = grid.cell_mut(coord) else {
            continue;
        };
        if !cell.is_background() {
            continue;
        }
        let Some(raw) = pixels.rgb_at(coord) else {
            continue;
        };
        match colors.nearest_assignment(raw) {
            Some(assignment) => {
                cell.show(assignment);
                updated.push(coord);
            }
            None => tracing::debug!(%coord, rgb = %raw, "No active color to restore label from"),
        }
    }

    updated
}
