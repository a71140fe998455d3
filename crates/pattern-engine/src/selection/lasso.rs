//! Free-form polygon (lasso) selection.
//!
//! Pointer positions are stage-local pixels: the grid is drawn with
//! `scale` pixels per cell, so cell `(x, y)` covers
//! `[x * scale, (x + 1) * scale) x [y * scale, (y + 1) * scale)` and is
//! represented by its center point during the containment test.

use serde::{Deserialize, Serialize};

use super::set::SelectionSet;
use crate::grid::CellCoord;

/// Minimum number of points a lasso needs to enclose anything.
pub const MIN_LASSO_POINTS: usize = 3;

/// A pointer position in stage-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagePoint {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

impl StagePoint {
    /// Create a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Center of cell `coord` on a stage with `scale` pixels per cell.
    pub fn cell_center(coord: CellCoord, scale: u32) -> Self {
        let scale = f64::from(scale);
        Self {
            x: coord.x as f64 * scale + scale / 2.0,
            y: coord.y as f64 * scale + scale / 2.0,
        }
    }
}

/// Map a stage point to the cell under it: `floor(x / scale)`.
///
/// Returns `None` for points left of or above the stage, points beyond the
/// `width x height` grid, and a zero scale.
pub fn stage_to_cell(point: StagePoint, scale: u32, width: usize, height: usize) -> Option<CellCoord> {
    if scale == 0 || !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    if point.x < 0.0 || point.y < 0.0 {
        return None;
    }
    let scale = f64::from(scale);
    let x = (point.x / scale).floor() as usize;
    let y = (point.y / scale).floor() as usize;
    (x < width && y < height).then_some(CellCoord::new(x, y))
}

/// Ray-casting parity test: is `point` inside `polygon`?
///
/// The polygon is closed implicitly from the last vertex back to the first.
/// A horizontal ray from `point` towards +x crosses edge `(xi, yi)-(xj, yj)`
/// when `yi > y` differs from `yj > y` and the edge's x at height `y` lies
/// strictly right of `point.x`. An odd number of crossings means inside.
pub fn point_in_polygon(point: StagePoint, polygon: &[StagePoint]) -> bool {
    let n = polygon.len();
    if n < MIN_LASSO_POINTS {
        return false;
    }

    let StagePoint { x, y } = point;
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);
        // (yi > y) != (yj > y) also guarantees yi != yj below
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Select every cell of a `width x height` grid whose center lies inside
/// `polygon`.
///
/// Returns `None` when the polygon has fewer than [`MIN_LASSO_POINTS`]
/// vertices: the gesture is abandoned and the caller leaves its selection
/// untouched.
pub fn lasso_select(
    polygon: &[StagePoint],
    width: usize,
    height: usize,
    scale: u32,
) -> Option<SelectionSet> {
    if polygon.len() < MIN_LASSO_POINTS {
        return None;
    }

    let selection = (0..height)
        .flat_map(|y| (0..width).map(move |x| CellCoord::new(x, y)))
        .filter(|&coord| point_in_polygon(StagePoint::cell_center(coord, scale), polygon))
        .collect();
    Some(selection)
}

/// Parse a lasso written as space-separated `x,y` pairs, e.g.
/// `"0,0 90,0 0,90"`.
pub fn parse_polygon(text: &str) -> Option<Vec<StagePoint>> {
    text.split_whitespace()
        .map(|pair| {
            let (x, y) = pair.split_once(',')?;
            Some(StagePoint::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pts(raw: &[(f64, f64)]) -> Vec<StagePoint> {
        raw.iter().map(|&(x, y)| StagePoint::new(x, y)).collect()
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(
            StagePoint::cell_center(CellCoord::new(2, 3), 9),
            StagePoint::new(22.5, 31.5)
        );
    }

    #[test]
    fn test_stage_to_cell_floors() {
        assert_eq!(
            stage_to_cell(StagePoint::new(17.9, 9.0), 9, 70, 100),
            Some(CellCoord::new(1, 1))
        );
        assert_eq!(
            stage_to_cell(StagePoint::new(0.0, 0.0), 9, 70, 100),
            Some(CellCoord::new(0, 0))
        );
    }

    #[test]
    fn test_stage_to_cell_rejects_outside() {
        assert_eq!(stage_to_cell(StagePoint::new(-0.1, 5.0), 9, 70, 100), None);
        assert_eq!(stage_to_cell(StagePoint::new(630.0, 5.0), 9, 70, 100), None);
        assert_eq!(stage_to_cell(StagePoint::new(5.0, 900.0), 9, 70, 100), None);
        assert_eq!(stage_to_cell(StagePoint::new(5.0, f64::NAN), 9, 70, 100), None);
        assert_eq!(stage_to_cell(StagePoint::new(5.0, 5.0), 0, 70, 100), None);
    }

    #[test]
    fn test_point_in_square() {
        let square = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(point_in_polygon(StagePoint::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(StagePoint::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(StagePoint::new(-1.0, 5.0), &square));
        assert!(!point_in_polygon(StagePoint::new(5.0, 11.0), &square));
    }

    #[test]
    fn test_concave_polygon() {
        // A "U" shape: the notch between the arms is outside.
        let u = pts(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 2.0),
            (2.0, 2.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        assert!(point_in_polygon(StagePoint::new(0.5, 1.5), &u));
        assert!(point_in_polygon(StagePoint::new(2.5, 1.5), &u));
        assert!(!point_in_polygon(StagePoint::new(1.5, 1.5), &u));
        assert!(point_in_polygon(StagePoint::new(1.5, 0.5), &u));
    }

    #[test]
    fn test_too_few_points_abandons() {
        assert!(lasso_select(&pts(&[(0.0, 0.0), (50.0, 50.0)]), 5, 5, 10).is_none());
        assert!(lasso_select(&[], 5, 5, 10).is_none());
    }

    #[test]
    fn test_degenerate_polygon_selects_nothing() {
        let line = pts(&[(0.0, 0.0), (25.0, 25.0), (50.0, 50.0)]);
        let selection = lasso_select(&line, 5, 5, 10).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_rectangle_lasso_selects_covered_centers() {
        // Stage 50x50 (5x5 cells, scale 10). Rectangle from 12 to 38 covers
        // centers 15, 25 and 35 on both axes.
        let rect = pts(&[(12.0, 12.0), (38.0, 12.0), (38.0, 38.0), (12.0, 38.0)]);
        let selection = lasso_select(&rect, 5, 5, 10).unwrap();
        assert_eq!(selection.len(), 9);
        assert!(selection.contains(CellCoord::new(1, 1)));
        assert!(selection.contains(CellCoord::new(3, 3)));
        assert!(!selection.contains(CellCoord::new(0, 2)));
    }

    #[test]
    fn test_parse_polygon() {
        assert_eq!(
            parse_polygon("0,0 90,0  0,90.5").unwrap(),
            pts(&[(0.0, 0.0), (90.0, 0.0), (0.0, 90.5)])
        );
        assert!(parse_polygon("0,0 90").is_none());
        assert!(parse_polygon("a,b").is_none());
    }
}
