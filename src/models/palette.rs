use crate::assets::AssetLoader;
use crate::error::AppError;
use pattern_engine::{PaletteEntry, PatternError, ReferencePalette};
use std::path::Path;

/// Parse a palette document: a YAML list of `id` + `rgb` entries
pub fn parse_palette(content: &str) -> Result<ReferencePalette, AppError> {
    let entries: Vec<PaletteEntry> =
        serde_yaml::from_str(content).map_err(|e| AppError::Palette(e.to_string()))?;
    ReferencePalette::new(entries).map_err(|e| PatternError::from(e).into())
}

/// Load the reference palette
///
/// `configured` is the palette path from config.yaml. Unlike the config, a
/// broken palette is an error: a silent fallback would change every color.
pub fn load_palette(loader: &AssetLoader, configured: Option<&Path>) -> Result<ReferencePalette, AppError> {
    let content = loader.read_palette_string(configured)?;
    let palette = parse_palette(&content)?;
    tracing::info!(colors = palette.len(), "Loaded palette");
    Ok(palette)
}
