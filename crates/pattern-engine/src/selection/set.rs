//! Ordered selection sets of grid cells.

use std::collections::BTreeSet;

use crate::grid::CellCoord;

/// The current interactive selection: a set of cell coordinates.
///
/// Backed by a `BTreeSet`, so iteration is row-major and deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    cells: BTreeSet<CellCoord>,
}

impl SelectionSet {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate. Returns `true` if it was not selected before.
    pub fn insert(&mut self, coord: CellCoord) -> bool {
        self.cells.insert(coord)
    }

    /// True if `coord` is selected.
    pub fn contains(&self, coord: CellCoord) -> bool {
        self.cells.contains(&coord)
    }

    /// Number of selected cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Drop every coordinate.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Union `other` into this selection.
    pub fn extend_from(&mut self, other: &SelectionSet) {
        self.cells.extend(other.cells.iter().copied());
    }

    /// Selected coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells.iter().copied()
    }

    /// Take the contents, leaving this selection empty.
    pub fn take(&mut self) -> SelectionSet {
        std::mem::take(self)
    }
}

impl FromIterator<CellCoord> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = CellCoord>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<CellCoord> for SelectionSet {
    fn extend<T: IntoIterator<Item = CellCoord>>(&mut self, iter: T) {
        self.cells.extend(iter);
    }
}
