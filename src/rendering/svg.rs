//! Pattern SVG generation.
//!
//! The grid, the selection highlight and the optional legend are laid out
//! here and handed to the `pattern.svg` Tera template as plain view structs.

use crate::error::RenderError;
use crate::models::AppConfig;
use pattern_engine::{Grid, LegendEntry, SelectionSet};
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "pattern.svg";

/// Legend swatch size in cells
const LEGEND_SWATCH_CELLS: u32 = 2;
/// Width reserved for the id text next to each swatch
const LEGEND_TEXT_WIDTH: u32 = 96;

/// Renders a pattern grid to SVG through a Tera template
pub struct PatternSvg {
    tera: Tera,
}

#[derive(Debug, Serialize)]
struct CellView {
    x: u32,
    y: u32,
    cx: f32,
    cy: f32,
    fill: String,
    label: Option<String>,
    tone: &'static str,
}

#[derive(Debug, Serialize)]
struct SelectedView {
    x: u32,
    y: u32,
}

#[derive(Debug, Serialize)]
struct LegendRowView {
    x: u32,
    y: u32,
    swatch_cx: f32,
    swatch_cy: f32,
    text_x: u32,
    fill: String,
    tone: &'static str,
    label: String,
    id: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct LegendView {
    swatch: u32,
    font_size: f64,
    rows: Vec<LegendRowView>,
}

/// Legend placement below a grid of `stage_width` x `stage_height` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LegendLayout {
    top: u32,
    swatch: u32,
    row_height: u32,
    column_width: u32,
    columns: u32,
}

impl LegendLayout {
    fn new(stage_width: u32, stage_height: u32, scale: u32) -> Self {
        let swatch = scale * LEGEND_SWATCH_CELLS;
        let column_width = swatch + LEGEND_TEXT_WIDTH;
        Self {
            top: stage_height + swatch,
            swatch,
            row_height: swatch + swatch / 4 + 1,
            column_width,
            columns: (stage_width / column_width).max(1),
        }
    }

    fn rows(&self, entries: usize) -> u32 {
        (entries as u32).div_ceil(self.columns)
    }

    /// Total height added below the grid
    fn height(&self, entries: usize) -> u32 {
        self.swatch * 2 + self.rows(entries) * self.row_height
    }

    fn origin(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let column = index % self.columns;
        let row = index / self.columns;
        (
            column * self.column_width + self.swatch / 2,
            self.top + row * self.row_height,
        )
    }
}

impl PatternSvg {
    /// Compile a pattern template
    pub fn new(template: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self { tera })
    }

    /// Render `grid` with `selection` highlighted
    ///
    /// The legend panel is drawn below the grid when `legend` is given and
    /// non-empty.
    pub fn render(
        &self,
        grid: &Grid,
        selection: &SelectionSet,
        legend: Option<&[LegendEntry]>,
        config: &AppConfig,
    ) -> Result<String, RenderError> {
        let scale = config.grid.scale;
        let stage_width = grid.width() as u32 * scale;
        let stage_height = grid.height() as u32 * scale;
        if stage_width == 0 || stage_height == 0 {
            return Err(RenderError::UnsupportedDimensions {
                width: stage_width,
                height: stage_height,
            });
        }

        let half = scale as f32 / 2.0;
        let cells: Vec<CellView> = grid
            .iter()
            .map(|cell| {
                let coord = cell.coord();
                let x = coord.x as u32 * scale;
                let y = coord.y as u32 * scale;
                CellView {
                    x,
                    y,
                    cx: x as f32 + half,
                    cy: y as f32 + half,
                    fill: cell.fill().to_hex(),
                    label: cell.visible_label().map(xml_escape),
                    tone: cell.tone().hex(),
                }
            })
            .collect();

        let selected: Vec<SelectedView> = selection
            .iter()
            .filter(|coord| grid.contains(*coord))
            .map(|coord| SelectedView {
                x: coord.x as u32 * scale,
                y: coord.y as u32 * scale,
            })
            .collect();

        let mut height = stage_height;
        let legend_view = match legend {
            Some(entries) if !entries.is_empty() => {
                let layout = LegendLayout::new(stage_width, stage_height, scale);
                height += layout.height(entries.len());
                Some(legend_view(entries, &layout))
            }
            _ => None,
        };

        let mut context = Context::new();
        context.insert("width", &stage_width);
        context.insert("height", &height);
        context.insert("scale", &scale);
        context.insert("font_family", &xml_escape(&config.render.font_family));
        context.insert("font_size", &config.font_size());
        context.insert("highlight", &xml_escape(&config.render.highlight));
        context.insert("cells", &cells);
        context.insert("selected", &selected);
        context.insert("legend", &legend_view);

        let svg = self.tera.render(TEMPLATE_NAME, &context)?;
        tracing::debug!(
            cells = cells.len(),
            selected = selected.len(),
            bytes = svg.len(),
            "Rendered pattern SVG"
        );
        Ok(svg)
    }
}

fn legend_view(entries: &[LegendEntry], layout: &LegendLayout) -> LegendView {
    let half = layout.swatch as f32 / 2.0;
    let rows = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let (x, y) = layout.origin(index);
            LegendRowView {
                x,
                y,
                swatch_cx: x as f32 + half,
                swatch_cy: y as f32 + half,
                text_x: x + layout.swatch + layout.swatch / 3,
                fill: entry.rgb.to_hex(),
                tone: entry.rgb.text_tone().hex(),
                label: xml_escape(&entry.label),
                id: xml_escape(&entry.id),
                count: entry.count,
            }
        })
        .collect();

    LegendView {
        swatch: layout.swatch,
        font_size: (layout.swatch * 6) as f64 / 10.0,
        rows,
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetLoader, PATTERN_TEMPLATE};
    use pattern_engine::{
        generate_pattern, CellCoord, GridConfig, PixelBuffer, ReferencePalette, Rgb,
    };

    fn renderer() -> PatternSvg {
        let template = AssetLoader::default()
            .read_template(PATTERN_TEMPLATE)
            .unwrap();
        PatternSvg::new(&template).unwrap()
    }

    fn small_config() -> AppConfig {
        AppConfig {
            grid: GridConfig::new(2, 2, 1, 10),
            ..AppConfig::default()
        }
    }

    fn small_grid() -> Grid {
        let palette =
            ReferencePalette::from_hex(&[("310", "#000000"), ("B5200", "#FFFFFF")]).unwrap();
        let colors = [
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            Rgb::new(0, 0, 0),
            Rgb::new(250, 250, 250),
        ];
        let pixels = PixelBuffer::from_colors(&colors, 2, 2).unwrap();
        generate_pattern(pixels, &palette, 1).grid
    }

    #[test]
    fn test_render_cells_and_labels() {
        let grid = small_grid();
        let svg = renderer()
            .render(&grid, &SelectionSet::new(), None, &small_config())
            .unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="20" height="20""#));
        assert_eq!(svg.matches("fill=\"#000000\"/>").count(), 3);
        // Three labelled cells, the white one is background
        assert_eq!(svg.matches(">1</text>").count(), 3);
        assert!(svg.contains("fill=\"#fafafa\""));
        assert!(!svg.contains("stroke=\"#FF0000\""));
    }

    #[test]
    fn test_render_selection_highlight() {
        let grid = small_grid();
        let selection: SelectionSet = [CellCoord::new(1, 1)].into_iter().collect();
        let svg = renderer()
            .render(&grid, &selection, None, &small_config())
            .unwrap();

        assert!(svg.contains("stroke=\"#FF0000\""));
        assert!(svg.contains(r#"<rect x="10" y="10" width="10" height="10"/>"#));
    }

    #[test]
    fn test_render_with_legend_extends_height() {
        let grid = small_grid();
        let legend = vec![LegendEntry {
            label: "1".to_string(),
            id: "310".to_string(),
            rgb: Rgb::new(0, 0, 0),
            count: 3,
        }];
        let svg = renderer()
            .render(&grid, &SelectionSet::new(), Some(&legend), &small_config())
            .unwrap();

        // 20 grid + 2 * 20 padding + one 26 px row
        assert!(svg.contains(r#"width="20" height="86""#));
        assert!(svg.contains("310 (3)"));
    }

    #[test]
    fn test_empty_legend_is_skipped() {
        let grid = small_grid();
        let svg = renderer()
            .render(&grid, &SelectionSet::new(), Some(&[]), &small_config())
            .unwrap();
        assert!(svg.contains(r#"width="20" height="20""#));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let err = renderer()
            .render(&Grid::empty(), &SelectionSet::new(), None, &small_config())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedDimensions { .. }));
    }

    #[test]
    fn test_legend_layout_columns() {
        let layout = LegendLayout::new(630, 900, 9);
        assert_eq!(layout.swatch, 18);
        assert_eq!(layout.columns, 5);
        assert_eq!(layout.rows(20), 4);
        assert_eq!(layout.origin(0), (9, 918));
        assert_eq!(layout.origin(6), (114 + 9, 918 + layout.row_height));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
