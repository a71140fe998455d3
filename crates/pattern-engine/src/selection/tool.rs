//! Interactive tool modes and the in-progress lasso gesture.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lasso::{StagePoint, MIN_LASSO_POINTS};

/// The active interactive tool. At most one tool is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolMode {
    /// No tool: pointer gestures do nothing.
    #[default]
    None,
    /// Free-form polygon selection.
    Lasso,
    /// Connected-region (flood fill) selection.
    ConnectedRegion,
}

impl ToolMode {
    /// Mode after pressing the button for `tool` while `self` is active.
    ///
    /// Pressing the active tool's button turns it off; pressing another
    /// tool's button switches to it.
    pub fn toggled(self, tool: ToolMode) -> ToolMode {
        if self == tool {
            ToolMode::None
        } else {
            tool
        }
    }

    /// True for any mode other than [`ToolMode::None`].
    pub fn is_active(self) -> bool {
        self != ToolMode::None
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolMode::None => "none",
            ToolMode::Lasso => "lasso",
            ToolMode::ConnectedRegion => "connected-region",
        };
        f.write_str(name)
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ToolMode::None),
            "lasso" => Ok(ToolMode::Lasso),
            "connected-region" | "region" => Ok(ToolMode::ConnectedRegion),
            other => Err(format!("unknown tool: {other}")),
        }
    }
}

/// An in-progress lasso drag.
///
/// `begin` starts a fresh point list, `extend` appends while the pointer is
/// down, `finish` hands the polygon over if it has enough points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LassoGesture {
    points: Vec<StagePoint>,
    drawing: bool,
}

impl LassoGesture {
    /// An idle gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start drawing at `point`, discarding any previous points.
    pub fn begin(&mut self, point: StagePoint) {
        self.points.clear();
        self.points.push(point);
        self.drawing = true;
    }

    /// Append `point` if a drag is in progress. Returns whether it was kept.
    pub fn extend(&mut self, point: StagePoint) -> bool {
        if self.drawing {
            self.points.push(point);
        }
        self.drawing
    }

    /// End the drag and return the polygon, or `None` when it has fewer
    /// than three points (or no drag was in progress).
    pub fn finish(&mut self) -> Option<Vec<StagePoint>> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let points = std::mem::take(&mut self.points);
        (points.len() >= MIN_LASSO_POINTS).then_some(points)
    }

    /// Drop the drag without selecting anything.
    pub fn cancel(&mut self) {
        self.points.clear();
        self.drawing = false;
    }

    /// True while the pointer is down.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points recorded so far, for live feedback.
    pub fn points(&self) -> &[StagePoint] {
        &self.points
    }
}
