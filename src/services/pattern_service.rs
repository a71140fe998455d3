//! Pattern generation service.
//!
//! Owns the loaded palette, the compiled template and the rasterizer, and
//! drives a [`PatternSession`] the way an interactive editor would: tools are
//! switched, pointer gestures are replayed in stage coordinates, and each
//! bulk edit is applied to whatever the gesture selected.

use crate::assets::{AssetLoader, PATTERN_TEMPLATE};
use crate::error::AppError;
use crate::models::AppConfig;
use crate::rendering::{PatternSvg, SvgRenderer};
use crate::services::image_loader::prepare_pixels;
use crate::services::legend::LegendDocument;
use pattern_engine::{
    parse_polygon, CellCoord, PatternSession, ReferencePalette, StagePoint, ToolMode,
};
use std::fmt;
use std::str::FromStr;

/// How an edit picks its cells
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    /// Connected region containing this cell
    Region(CellCoord),
    /// Cells whose centres fall inside this stage-pixel polygon
    Lasso(Vec<StagePoint>),
}

impl EditTarget {
    /// Parse `"X,Y"` into a region target
    pub fn parse_region(text: &str) -> Result<Self, AppError> {
        let (x, y) = text
            .split_once(',')
            .ok_or_else(|| AppError::InvalidArgument(format!("expected X,Y, got {text:?}")))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<usize>()
                .map_err(|e| AppError::InvalidArgument(format!("{text:?}: {e}")))
        };
        Ok(Self::Region(CellCoord::new(parse(x)?, parse(y)?)))
    }

    /// Parse `"x,y x,y x,y ..."` into a lasso target
    pub fn parse_lasso(text: &str) -> Result<Self, AppError> {
        parse_polygon(text).map(Self::Lasso).ok_or_else(|| {
            AppError::InvalidArgument(format!("expected \"x,y x,y x,y ...\", got {text:?}"))
        })
    }
}

/// What an edit does to the selected cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    Hide,
    Restore,
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditAction::Hide => write!(f, "hide"),
            EditAction::Restore => write!(f, "restore"),
        }
    }
}

impl FromStr for EditAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hide" => Ok(EditAction::Hide),
            "restore" => Ok(EditAction::Restore),
            other => Err(AppError::InvalidArgument(format!("unknown action {other:?}"))),
        }
    }
}

/// One scripted label edit
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEdit {
    pub action: EditAction,
    pub target: EditTarget,
}

impl LabelEdit {
    pub fn new(action: EditAction, target: EditTarget) -> Self {
        Self { action, target }
    }

    /// Parse a command-line edit, e.g. flag `hide-region` with value `"3,4"`
    /// or `restore-lasso` with `"0,0 90,0 90,90"`
    pub fn from_flag(flag: &str, value: &str) -> Result<Self, AppError> {
        let (action, kind) = flag
            .split_once('-')
            .ok_or_else(|| AppError::InvalidArgument(format!("unknown edit {flag:?}")))?;
        let target = match kind {
            "region" => EditTarget::parse_region(value)?,
            "lasso" => EditTarget::parse_lasso(value)?,
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "unknown edit target {other:?}"
                )))
            }
        };
        Ok(Self::new(action.parse()?, target))
    }
}

/// Outcome of one applied edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditReport {
    pub action: EditAction,
    pub selected: usize,
    pub changed: usize,
}

/// Rendered outputs of a session
#[derive(Debug)]
pub struct RenderedPattern {
    pub svg: String,
    pub png: Vec<u8>,
    pub legend: LegendDocument,
}

pub struct PatternService {
    config: AppConfig,
    palette: ReferencePalette,
    template: PatternSvg,
    renderer: SvgRenderer,
}

impl PatternService {
    pub fn new(config: AppConfig, palette: ReferencePalette, loader: &AssetLoader) -> Result<Self, AppError> {
        config.grid.validate().map_err(|e| AppError::Pattern(e.into()))?;
        let template = PatternSvg::new(&loader.read_template(PATTERN_TEMPLATE)?)?;
        let renderer = SvgRenderer::with_fonts(loader.get_fonts());

        tracing::info!(
            palette = palette.len(),
            fonts = renderer.font_count(),
            "Pattern service initialized"
        );

        Ok(Self {
            config,
            palette,
            template,
            renderer,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn palette(&self) -> &ReferencePalette {
        &self.palette
    }

    /// A fresh session with this service's grid and palette
    pub fn session(&self) -> Result<PatternSession, AppError> {
        Ok(PatternSession::new(self.config.grid, self.palette.clone())?)
    }

    /// Decode `image` and generate a pattern in a fresh session
    pub fn generate(&self, image: &[u8]) -> Result<PatternSession, AppError> {
        let pixels = prepare_pixels(image, &self.config.grid)?;
        let mut session = self.session()?;
        session.generate(pixels)?;
        Ok(session)
    }

    /// Select the target with the matching tool, then apply the action
    ///
    /// Regions are picked with a click on the cell centre and lassos are
    /// replayed as a press, drags and a release.
    pub fn apply(&self, session: &mut PatternSession, edit: &LabelEdit) -> EditReport {
        match &edit.target {
            EditTarget::Region(coord) => {
                session.set_tool(ToolMode::ConnectedRegion);
                session.pointer_down(StagePoint::cell_center(*coord, self.config.grid.scale), false);
            }
            EditTarget::Lasso(points) => {
                session.set_tool(ToolMode::Lasso);
                if let Some((first, rest)) = points.split_first() {
                    session.pointer_down(*first, false);
                    for point in rest {
                        session.pointer_move(*point);
                    }
                    session.pointer_up();
                }
            }
        }

        let selected = session.selection().len();
        let changed = match edit.action {
            EditAction::Hide => session.hide_labels(),
            EditAction::Restore => session.restore_labels(),
        };
        if selected == 0 {
            tracing::warn!(action = %edit.action, target = ?edit.target, "Edit selected no cells");
        }

        EditReport {
            action: edit.action,
            selected,
            changed,
        }
    }

    /// Render the session's current grid and legend
    pub fn render(&self, session: &PatternSession) -> Result<RenderedPattern, AppError> {
        let entries = session.legend();
        let legend = self.config.render.legend.then_some(entries.as_slice());
        let svg = self
            .template
            .render(session.grid(), session.selection(), legend, &self.config)?;
        let png = self.renderer.render_png(svg.as_bytes())?;

        Ok(RenderedPattern {
            svg,
            png,
            legend: LegendDocument::new(session.grid(), &entries),
        })
    }
}
