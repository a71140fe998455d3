use crate::error::RenderError;
use pattern_engine::{Grid, LegendEntry};
use serde::Serialize;

/// One color of the legend export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendColor {
    pub id: String,
    pub label: String,
    pub rgb: [u8; 3],
    pub hex: String,
    pub count: usize,
}

impl From<&LegendEntry> for LegendColor {
    fn from(entry: &LegendEntry) -> Self {
        Self {
            id: entry.id.clone(),
            label: entry.label.clone(),
            rgb: entry.rgb.to_bytes(),
            hex: entry.rgb.to_hex(),
            count: entry.count,
        }
    }
}

/// Machine-readable legend of a generated pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendDocument {
    pub width: usize,
    pub height: usize,
    /// Cells without a visible label
    pub background: usize,
    pub colors: Vec<LegendColor>,
}

impl LegendDocument {
    pub fn new(grid: &Grid, entries: &[LegendEntry]) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            background: grid.background_count(),
            colors: entries.iter().map(LegendColor::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain text legend, one `"<id> - <label>"` line per color
    pub fn lines(&self) -> Vec<String> {
        self.colors
            .iter()
            .map(|c| format!("{} - {}", c.id, c.label))
            .collect()
    }
}
