use crate::assets::AssetLoader;
use pattern_engine::GridConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration loaded from config.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Grid dimensions, color capacity and cell scale
    pub grid: GridConfig,

    /// Palette YAML file; the embedded catalog is used when unset
    pub palette: Option<PathBuf>,

    /// How the pattern is drawn
    pub render: RenderConfig,
}

/// Pattern drawing options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font stack for the cell labels
    pub font_family: String,

    /// Label font size relative to the cell size
    pub font_ratio: f64,

    /// Stroke color of selected cells
    pub highlight: String,

    /// Draw the legend panel below the grid
    pub legend: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_family: "Roboto Mono, Courier New, monospace".to_string(),
            font_ratio: 0.8,
            highlight: "#FF0000".to_string(),
            legend: true,
        }
    }
}

impl AppConfig {
    /// Parse a config document
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Unreadable or invalid configs fall back to the defaults with a
    /// warning so a broken file never blocks pattern generation.
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        let config = match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    return Self::default();
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                return Self::default();
            }
        };

        if let Err(e) = config.grid.validate() {
            tracing::warn!(%e, "Invalid grid config, using default grid");
            return Self {
                grid: GridConfig::default(),
                ..config
            };
        }

        tracing::info!(
            width = config.grid.width,
            height = config.grid.height,
            capacity = config.grid.capacity,
            scale = config.grid.scale,
            "Loaded configuration"
        );
        config
    }

    /// Label font size in pixels, rounded to hundredths
    pub fn font_size(&self) -> f64 {
        (self.grid.scale as f64 * self.render.font_ratio * 100.0).round() / 100.0
    }
}
