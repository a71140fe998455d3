//! Config and palette resolution across embedded assets and files.

mod common;

use common::*;
use diamond_pattern::assets::{AssetCategory, AssetLoader, PATTERN_TEMPLATE};
use diamond_pattern::error::AppError;
use diamond_pattern::models::{load_palette, AppConfig};
use pattern_engine::{GridConfig, PaletteError, PatternError, Rgb};
use pretty_assertions::assert_eq;

#[test]
fn test_embedded_defaults() {
    let loader = AssetLoader::default();
    let config = AppConfig::load_from_assets(&loader);
    assert_eq!(config.grid, GridConfig::DEFAULT);
    assert!(config.render.legend);

    let palette = load_palette(&loader, config.palette.as_deref()).unwrap();
    assert!(palette.len() > config.grid.capacity);
    assert!(palette.position(Rgb::new(255, 255, 255)).is_some());
}

#[test]
fn test_init_round_trips_embedded_assets() {
    let ws = Workspace::new();
    let loader = ws.loader();

    let report = loader
        .init(&[AssetCategory::Config, AssetCategory::Palette], false)
        .unwrap();
    assert_eq!(report.written.len(), 2);

    // Extracted files load back to the same values
    let config = AppConfig::load_from_assets(&loader);
    assert_eq!(config, AppConfig::default());
    let from_file = load_palette(&loader, None).unwrap();
    let embedded = load_palette(&AssetLoader::default(), None).unwrap();
    assert_eq!(from_file, embedded);
}

#[test]
fn test_config_palette_path_is_used() {
    let ws = Workspace::new();
    let palette_path = ws.write("custom.yaml", TEST_PALETTE_YAML);
    let config_path = ws.write(
        "config.yaml",
        format!("palette: {}\n", palette_path.display()),
    );

    let loader = AssetLoader::new(Some(config_path), None, None);
    let config = AppConfig::load_from_assets(&loader);
    let palette = load_palette(&loader, config.palette.as_deref()).unwrap();
    assert_eq!(palette.len(), 4);
    assert_eq!(palette.get(3).unwrap().id, "820");
}

#[test]
fn test_duplicate_palette_color_is_rejected() {
    let ws = Workspace::new();
    ws.write(
        "palette.yaml",
        "- id: A\n  rgb: [1, 2, 3]\n- id: B\n  rgb: [1, 2, 3]\n",
    );

    let err = load_palette(&ws.loader(), None).unwrap_err();
    assert!(matches!(
        err,
        AppError::Pattern(PatternError::Palette(PaletteError::DuplicateColor { index: 1 }))
    ));
}

#[test]
fn test_missing_palette_file_is_io_error() {
    let ws = Workspace::new();
    let err = load_palette(&ws.loader(), None).unwrap_err();
    assert!(matches!(err, AppError::Io(_)));
}

#[test]
fn test_broken_config_uses_defaults() {
    let ws = Workspace::new();
    ws.write("config.yaml", "grid: {width: -3}");
    assert_eq!(AppConfig::load_from_assets(&ws.loader()), AppConfig::default());
}

#[test]
fn test_embedded_template_lists() {
    assert_eq!(
        AssetLoader::list_embedded(AssetCategory::Templates),
        vec![PATTERN_TEMPLATE.to_string()]
    );
}
