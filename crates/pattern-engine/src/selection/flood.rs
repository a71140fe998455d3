//! Connected-region selection.

use std::collections::HashSet;

use super::set::SelectionSet;
use crate::color::Rgb;
use crate::grid::{Cell, CellCoord, Grid};

/// What two cells must share to belong to the same region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegionKey<'a> {
    label: Option<&'a str>,
    fill: Rgb,
}

impl<'a> From<&'a Cell> for RegionKey<'a> {
    fn from(cell: &'a Cell) -> Self {
        Self {
            label: cell.label(),
            fill: cell.fill(),
        }
    }
}

/// Select the 4-connected region around `seed`.
///
/// A cell joins the region when its `(label, fill)` pair equals the seed's
/// exactly; an unlabelled cell only matches other unlabelled cells of the
/// same fill. Neighbours are up, down, left and right. Every reachable
/// matching cell is visited once through an explicit stack, so region size
/// is bounded by the grid rather than by recursion depth.
///
/// Returns an empty set when `seed` lies outside the grid.
pub fn connected_region(grid: &Grid, seed: CellCoord) -> SelectionSet {
    let mut region = SelectionSet::new();
    let Some(seed_cell) = grid.cell(seed) else {
        return region;
    };
    let target = RegionKey::from(seed_cell);

    let mut visited: HashSet<CellCoord> = HashSet::new();
    let mut stack = vec![seed];

    while let Some(coord) = stack.pop() {
        if !visited.insert(coord) {
            continue;
        }
        let Some(cell) = grid.cell(coord) else {
            continue;
        };
        if RegionKey::from(cell) != target {
            continue;
        }

        region.insert(coord);
        for next in neighbours(coord, grid.width(), grid.height()) {
            if !visited.contains(&next) {
                stack.push(next);
            }
        }
    }

    region
}

fn neighbours(coord: CellCoord, width: usize, height: usize) -> impl Iterator<Item = CellCoord> {
    let CellCoord { x, y } = coord;
    let left = x.checked_sub(1).map(|x| CellCoord::new(x, y));
    let right = (x + 1 < width).then(|| CellCoord::new(x + 1, y));
    let up = y.checked_sub(1).map(|y| CellCoord::new(x, y));
    let down = (y + 1 < height).then(|| CellCoord::new(x, y + 1));
    [left, right, up, down].into_iter().flatten()
}
