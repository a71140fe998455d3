//! Session change notifications.

use crate::grid::CellCoord;
use crate::selection::ToolMode;

/// A change in session state a renderer needs to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new grid and color map replaced the previous ones.
    PatternGenerated {
        /// Grid width in cells
        width: usize,
        /// Grid height in cells
        height: usize,
        /// Number of selected colors
        colors: usize,
    },
    /// The selection set changed; `len` cells are now selected.
    SelectionChanged {
        /// Selected cell count
        len: usize,
    },
    /// The listed cells changed label visibility, fill or tone.
    CellsUpdated(Vec<CellCoord>),
    /// The active tool changed.
    ToolChanged(ToolMode),
}

/// Receives [`SessionEvent`]s from a [`PatternSession`](super::PatternSession).
pub trait SessionObserver {
    /// Called after the state change described by `event` is complete.
    fn on_event(&mut self, event: &SessionEvent);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent),
{
    fn on_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
