//! Interactive cell selection.
//!
//! Two exclusive tools produce a [`SelectionSet`]:
//!
//! - [`connected_region()`]: 4-connected flood fill over cells sharing the
//!   seed's label and fill
//! - [`lasso_select()`]: cells whose centers lie inside a free-form polygon

mod flood;
mod lasso;
mod set;
mod tool;

pub use flood::connected_region;
pub use lasso::{
    lasso_select, parse_polygon, point_in_polygon, stage_to_cell, StagePoint, MIN_LASSO_POINTS,
};
pub use set::SelectionSet;
pub use tool::{LassoGesture, ToolMode};
