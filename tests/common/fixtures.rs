//! Test fixtures: small PNG images and palettes written to temp dirs.

use diamond_pattern::assets::AssetLoader;
use diamond_pattern::models::AppConfig;
use diamond_pattern::services::PatternService;
use pattern_engine::{GridConfig, ReferencePalette};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Catalog with a few strongly separated colors
pub const TEST_PALETTE_YAML: &str = r#"- id: "310"
  rgb: [0, 0, 0]
- id: B5200
  rgb: [255, 255, 255]
- id: "666"
  rgb: [227, 29, 66]
- id: "820"
  rgb: [14, 54, 92]
"#;

/// Encode tightly packed RGB8 data as PNG
pub fn encode_rgb_png(width: u32, height: u32, rgb: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgb).unwrap();
    }
    buf
}

/// `width x height` image made of vertical bands, one color per band
pub fn banded_png(width: u32, height: u32, bands: &[[u8; 3]]) -> Vec<u8> {
    let band_width = width / bands.len() as u32;
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            let band = ((x / band_width) as usize).min(bands.len() - 1);
            data.extend_from_slice(&bands[band]);
        }
    }
    encode_rgb_png(width, height, &data)
}

/// Decode a PNG into (width, height, 8-bit samples per pixel, data)
pub fn decode_png(png_data: &[u8]) -> (u32, u32, usize, Vec<u8>) {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(png_data));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    buf.truncate(info.buffer_size());
    let channels = buf.len() / (info.width * info.height) as usize;
    (info.width, info.height, channels, buf)
}

/// A temp dir holding palette and config files
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Loader pointing at `config.yaml` and `palette.yaml` in this dir
    pub fn loader(&self) -> AssetLoader {
        AssetLoader::new(
            Some(self.path("config.yaml")),
            Some(self.path("palette.yaml")),
            None,
        )
    }
}

/// Grid config YAML
pub fn config_yaml(grid: GridConfig, legend: bool) -> String {
    format!(
        "grid:\n  width: {}\n  height: {}\n  capacity: {}\n  scale: {}\nrender:\n  legend: {legend}\n",
        grid.width, grid.height, grid.capacity, grid.scale
    )
}

pub fn test_palette() -> ReferencePalette {
    diamond_pattern::models::parse_palette(TEST_PALETTE_YAML).unwrap()
}

/// Service over the test palette with the given grid
pub fn test_service(grid: GridConfig) -> PatternService {
    let config = AppConfig {
        grid,
        ..AppConfig::default()
    };
    PatternService::new(config, test_palette(), &AssetLoader::default()).unwrap()
}
