//! The editing session: one pattern, its selection and the active tool.

use std::fmt;

use super::events::{SessionEvent, SessionObserver};
use crate::error::{GridError, PatternError};
use crate::grid::{generate_pattern, CellCoord, Grid, GridConfig, PixelBuffer};
use crate::labels;
use crate::palette::{ActiveColorMap, LegendEntry, ReferencePalette};
use crate::selection::{
    connected_region, lasso_select, stage_to_cell, LassoGesture, SelectionSet, StagePoint,
    ToolMode,
};

/// The editing session for one pattern at a time.
///
/// Owns the grid, the active color map, the retained source pixels, the
/// selection, the tool mode and any in-progress lasso. Every operation runs
/// to completion and leaves the session consistent; observers are notified
/// once the state change is done.
pub struct PatternSession {
    config: GridConfig,
    palette: ReferencePalette,
    grid: Grid,
    colors: ActiveColorMap,
    pixels: Option<PixelBuffer>,
    selection: SelectionSet,
    tool: ToolMode,
    lasso: LassoGesture,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl PatternSession {
    /// Create an empty session (no pattern yet).
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Grid`] if `config` has a zero dimension,
    /// capacity or scale.
    pub fn new(config: GridConfig, palette: ReferencePalette) -> Result<Self, PatternError> {
        config.validate()?;
        Ok(Self {
            config,
            palette,
            grid: Grid::empty(),
            colors: ActiveColorMap::new(),
            pixels: None,
            selection: SelectionSet::new(),
            tool: ToolMode::None,
            lasso: LassoGesture::new(),
            observers: Vec::new(),
        })
    }

    /// Register an observer for [`SessionEvent`]s.
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn palette(&self) -> &ReferencePalette {
        &self.palette
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn colors(&self) -> &ActiveColorMap {
        &self.colors
    }

    /// Source pixels of the current pattern.
    pub fn pixels(&self) -> Option<&PixelBuffer> {
        self.pixels.as_ref()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// The lasso being drawn, for live feedback.
    pub fn lasso(&self) -> &LassoGesture {
        &self.lasso
    }

    /// True once a pattern has been generated.
    pub fn has_pattern(&self) -> bool {
        self.pixels.is_some()
    }

    /// Legend rows for the current pattern.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.colors.legend(&self.grid)
    }

    /// Generate a new pattern from `pixels`, replacing grid, color map,
    /// retained pixels and selection in one step.
    ///
    /// The tool mode is kept; an in-progress lasso is dropped.
    ///
    /// # Errors
    ///
    /// [`GridError::DimensionMismatch`] when `pixels` is not exactly the
    /// configured grid size. The session is left untouched.
    pub fn generate(&mut self, pixels: PixelBuffer) -> Result<(), PatternError> {
        if pixels.width() != self.config.width || pixels.height() != self.config.height {
            return Err(GridError::DimensionMismatch {
                width: self.config.width,
                height: self.config.height,
                actual_width: pixels.width(),
                actual_height: pixels.height(),
            }
            .into());
        }

        let pattern = generate_pattern(pixels, &self.palette, self.config.capacity);
        let had_selection = !self.selection.is_empty();

        self.grid = pattern.grid;
        self.colors = pattern.colors;
        self.pixels = Some(pattern.pixels);
        self.selection.clear();
        self.lasso.cancel();

        self.emit(SessionEvent::PatternGenerated {
            width: self.grid.width(),
            height: self.grid.height(),
            colors: self.colors.len(),
        });
        if had_selection {
            self.emit(SessionEvent::SelectionChanged { len: 0 });
        }
        Ok(())
    }

    /// Generate from raw RGBA bytes of the configured grid size.
    ///
    /// # Errors
    ///
    /// [`GridError::LengthMismatch`] if `rgba` is not `width * height * 4`
    /// bytes long. The session is left untouched.
    pub fn generate_from_rgba(&mut self, rgba: Vec<u8>) -> Result<(), PatternError> {
        let pixels = PixelBuffer::new(rgba, self.config.width, self.config.height)?;
        self.generate(pixels)
    }

    /// Press the button for `tool`: activates it, or turns it off if it is
    /// already active. Returns the resulting mode.
    pub fn toggle_tool(&mut self, tool: ToolMode) -> ToolMode {
        let next = self.tool.toggled(tool);
        self.set_tool(next);
        next
    }

    /// Switch to `tool`.
    ///
    /// Any in-progress lasso is dropped. Turning the tools off also clears
    /// the selection.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if tool == self.tool {
            return;
        }
        self.lasso.cancel();
        self.tool = tool;
        tracing::debug!(%tool, "Tool changed");

        if tool == ToolMode::None {
            self.clear_selection();
        }
        self.emit(SessionEvent::ToolChanged(tool));
    }

    /// Pointer pressed at a stage-local point.
    ///
    /// In lasso mode this starts a new polygon. In connected-region mode it
    /// selects the region under the pointer; `accumulate` adds to the
    /// current selection instead of replacing it. Points off the grid are
    /// ignored.
    pub fn pointer_down(&mut self, point: StagePoint, accumulate: bool) {
        match self.tool {
            ToolMode::Lasso => self.lasso.begin(point),
            ToolMode::ConnectedRegion => {
                let cell = stage_to_cell(
                    point,
                    self.config.scale,
                    self.grid.width(),
                    self.grid.height(),
                );
                if let Some(coord) = cell {
                    self.select_region(coord, accumulate);
                }
            }
            ToolMode::None => {}
        }
    }

    /// Pointer moved; extends the lasso while it is being drawn.
    pub fn pointer_move(&mut self, point: StagePoint) {
        if self.tool == ToolMode::Lasso {
            self.lasso.extend(point);
        }
    }

    /// Pointer released; completes the lasso.
    ///
    /// Returns `true` if the selection was replaced. A lasso with fewer than
    /// three points is abandoned and the selection is left as it was.
    pub fn pointer_up(&mut self) -> bool {
        if self.tool != ToolMode::Lasso {
            return false;
        }
        match self.lasso.finish() {
            Some(polygon) => self.select_lasso(&polygon),
            None => {
                tracing::debug!("Lasso abandoned");
                false
            }
        }
    }

    /// Select the connected region around `seed`.
    ///
    /// Without `accumulate` the previous selection is replaced. Returns the
    /// size of the resulting selection; a seed outside the grid changes
    /// nothing.
    pub fn select_region(&mut self, seed: CellCoord, accumulate: bool) -> usize {
        if !self.grid.contains(seed) {
            return self.selection.len();
        }

        let region = connected_region(&self.grid, seed);
        if !accumulate {
            self.selection.clear();
        }
        self.selection.extend_from(&region);

        tracing::debug!(
            %seed,
            region = region.len(),
            selected = self.selection.len(),
            accumulate,
            "Region selected"
        );
        self.emit(SessionEvent::SelectionChanged {
            len: self.selection.len(),
        });
        self.selection.len()
    }

    /// Replace the selection with the cells inside `polygon`.
    ///
    /// Returns `false`, leaving the selection untouched, when the polygon
    /// has fewer than three points.
    pub fn select_lasso(&mut self, polygon: &[StagePoint]) -> bool {
        let Some(selected) = lasso_select(
            polygon,
            self.grid.width(),
            self.grid.height(),
            self.config.scale,
        ) else {
            return false;
        };

        self.selection = selected;
        tracing::debug!(
            points = polygon.len(),
            selected = self.selection.len(),
            "Lasso selected"
        );
        self.emit(SessionEvent::SelectionChanged {
            len: self.selection.len(),
        });
        true
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.emit(SessionEvent::SelectionChanged { len: 0 });
    }

    /// Hide labels of every selected cell, then clear the selection and
    /// switch the tools off. Returns the number of cells that changed.
    pub fn hide_labels(&mut self) -> usize {
        let changed = labels::hide_labels(&mut self.grid, &self.selection);
        tracing::info!(
            selected = self.selection.len(),
            hidden = changed.len(),
            "Labels hidden"
        );
        self.finish_bulk_edit(changed)
    }

    /// Recompute labels of every selected background cell from the source
    /// pixels and the active colors, then clear the selection and switch the
    /// tools off. Returns the number of cells that changed.
    pub fn restore_labels(&mut self) -> usize {
        let changed = match &self.pixels {
            Some(pixels) => {
                labels::restore_labels(&mut self.grid, &self.selection, &self.colors, pixels)
            }
            None => Vec::new(),
        };
        tracing::info!(
            selected = self.selection.len(),
            restored = changed.len(),
            "Labels restored"
        );
        self.finish_bulk_edit(changed)
    }

    fn finish_bulk_edit(&mut self, changed: Vec<CellCoord>) -> usize {
        let count = changed.len();
        if !changed.is_empty() {
            self.emit(SessionEvent::CellsUpdated(changed));
        }
        self.clear_selection();
        self.lasso.cancel();
        if self.tool != ToolMode::None {
            self.tool = ToolMode::None;
            self.emit(SessionEvent::ToolChanged(ToolMode::None));
        }
        count
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl fmt::Debug for PatternSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternSession")
            .field("config", &self.config)
            .field("palette", &self.palette.len())
            .field("grid", &(self.grid.width(), self.grid.height()))
            .field("colors", &self.colors.len())
            .field("selection", &self.selection.len())
            .field("tool", &self.tool)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::color::Rgb;
    use pretty_assertions::assert_eq;

    const BLACK: Rgb = Rgb::new(0, 0, 0);
    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn palette() -> ReferencePalette {
        ReferencePalette::from_hex(&[("310", "#000000"), ("B5200", "#FFFFFF")]).unwrap()
    }

    /// 4x4 grid, scale 10: a black 2x2 block top-left, white elsewhere.
    fn session() -> (PatternSession, Rc<RefCell<Vec<SessionEvent>>>) {
        let config = GridConfig::new(4, 4, 2, 10);
        let mut session = PatternSession::new(config, palette()).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        session.subscribe(move |event: &SessionEvent| sink.borrow_mut().push(event.clone()));

        let colors: Vec<Rgb> = (0..16)
            .map(|i| if i % 4 < 2 && i / 4 < 2 { BLACK } else { WHITE })
            .collect();
        session
            .generate(PixelBuffer::from_colors(&colors, 4, 4).unwrap())
            .unwrap();
        log.borrow_mut().clear();
        (session, log)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = PatternSession::new(GridConfig::new(4, 4, 0, 10), palette()).unwrap_err();
        assert_eq!(err, PatternError::Grid(GridError::ZeroCapacity));
    }

    #[test]
    fn test_generate_rejects_wrong_size_and_keeps_state() {
        let (mut session, log) = session();
        let before = session.grid().clone();
        let wrong = PixelBuffer::from_colors(&[BLACK; 4], 2, 2).unwrap();
        assert!(matches!(
            session.generate(wrong),
            Err(PatternError::Grid(GridError::DimensionMismatch { .. }))
        ));
        assert!(matches!(
            session.generate_from_rgba(vec![0; 10]),
            Err(PatternError::Grid(GridError::LengthMismatch { .. }))
        ));
        assert_eq!(session.grid(), &before);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_generate_discards_selection() {
        let (mut session, log) = session();
        session.select_region(CellCoord::new(0, 0), false);
        session.set_tool(ToolMode::Lasso);
        log.borrow_mut().clear();

        session.generate_from_rgba(vec![255; 64]).unwrap();
        assert!(session.selection().is_empty());
        assert_eq!(session.tool(), ToolMode::Lasso);
        assert_eq!(
            *log.borrow(),
            vec![
                SessionEvent::PatternGenerated {
                    width: 4,
                    height: 4,
                    colors: 1
                },
                SessionEvent::SelectionChanged { len: 0 },
            ]
        );
    }

    #[test]
    fn test_region_pointer_flow() {
        let (mut session, _log) = session();
        assert_eq!(session.toggle_tool(ToolMode::ConnectedRegion), ToolMode::ConnectedRegion);

        session.pointer_down(StagePoint::new(15.0, 5.0), false);
        assert_eq!(session.selection().len(), 4);

        // Outside the stage: ignored
        session.pointer_down(StagePoint::new(45.0, 5.0), false);
        assert_eq!(session.selection().len(), 4);

        session.pointer_down(StagePoint::new(35.0, 35.0), true);
        assert_eq!(session.selection().len(), 16);

        session.pointer_down(StagePoint::new(35.0, 35.0), false);
        assert_eq!(session.selection().len(), 12);
    }

    #[test]
    fn test_lasso_pointer_flow() {
        let (mut session, _log) = session();
        session.set_tool(ToolMode::Lasso);

        session.pointer_down(StagePoint::new(0.0, 0.0), false);
        session.pointer_move(StagePoint::new(20.0, 0.0));
        session.pointer_move(StagePoint::new(20.0, 20.0));
        session.pointer_move(StagePoint::new(0.0, 20.0));
        assert!(session.pointer_up());
        let selected: Vec<CellCoord> = session.selection().iter().collect();
        assert_eq!(
            selected,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1)
            ]
        );

        // A two-point drag is abandoned and keeps the previous selection.
        session.pointer_down(StagePoint::new(0.0, 0.0), false);
        session.pointer_move(StagePoint::new(40.0, 40.0));
        assert!(!session.pointer_up());
        assert_eq!(session.selection().len(), 4);
    }

    #[test]
    fn test_toggle_off_clears_selection() {
        let (mut session, log) = session();
        session.toggle_tool(ToolMode::ConnectedRegion);
        session.pointer_down(StagePoint::new(5.0, 5.0), false);

        // Switching tools keeps the selection
        session.toggle_tool(ToolMode::Lasso);
        assert_eq!(session.selection().len(), 4);

        log.borrow_mut().clear();
        assert_eq!(session.toggle_tool(ToolMode::Lasso), ToolMode::None);
        assert!(session.selection().is_empty());
        assert_eq!(
            *log.borrow(),
            vec![
                SessionEvent::SelectionChanged { len: 0 },
                SessionEvent::ToolChanged(ToolMode::None),
            ]
        );
    }

    #[test]
    fn test_switching_tool_cancels_lasso() {
        let (mut session, _log) = session();
        session.set_tool(ToolMode::Lasso);
        session.pointer_down(StagePoint::new(0.0, 0.0), false);
        session.pointer_move(StagePoint::new(10.0, 0.0));
        session.set_tool(ToolMode::ConnectedRegion);
        assert!(!session.lasso().is_drawing());
        assert!(!session.pointer_up());
    }

    #[test]
    fn test_hide_then_restore() {
        let (mut session, log) = session();
        let before = session.grid().clone();
        session.toggle_tool(ToolMode::ConnectedRegion);
        session.select_region(CellCoord::new(0, 0), false);
        log.borrow_mut().clear();

        assert_eq!(session.hide_labels(), 4);
        assert_eq!(session.grid().background_count(), 4);
        assert_eq!(session.tool(), ToolMode::None);
        assert!(session.selection().is_empty());
        assert_eq!(
            *log.borrow(),
            vec![
                SessionEvent::CellsUpdated(vec![
                    CellCoord::new(0, 0),
                    CellCoord::new(1, 0),
                    CellCoord::new(0, 1),
                    CellCoord::new(1, 1)
                ]),
                SessionEvent::SelectionChanged { len: 0 },
                SessionEvent::ToolChanged(ToolMode::None),
            ]
        );

        // Hidden cells keep label and fill, so the region is still 4 cells
        session.select_region(CellCoord::new(1, 1), false);
        assert_eq!(session.selection().len(), 4);
        assert_eq!(session.restore_labels(), 4);
        assert_eq!(session.grid(), &before);
    }

    #[test]
    fn test_bulk_edit_with_empty_selection() {
        let (mut session, log) = session();
        session.set_tool(ToolMode::Lasso);
        log.borrow_mut().clear();

        assert_eq!(session.hide_labels(), 0);
        assert_eq!(session.tool(), ToolMode::None);
        assert_eq!(*log.borrow(), vec![SessionEvent::ToolChanged(ToolMode::None)]);
    }

    #[test]
    fn test_restore_before_generate() {
        let mut session =
            PatternSession::new(GridConfig::new(2, 2, 2, 10), palette()).unwrap();
        assert!(!session.has_pattern());
        assert_eq!(session.restore_labels(), 0);
        assert_eq!(session.select_region(CellCoord::new(0, 0), false), 0);
    }

    #[test]
    fn test_legend_counts_visible_labels() {
        let (mut session, _log) = session();
        let legend = session.legend();
        assert_eq!(legend.len(), 2);
        assert_eq!((legend[0].id.as_str(), legend[0].count), ("310", 4));
        assert_eq!((legend[1].id.as_str(), legend[1].count), ("B5200", 12));

        session.select_region(CellCoord::new(0, 0), false);
        session.hide_labels();
        assert_eq!(session.legend()[0].count, 0);
    }
}
