//! Embedded assets and their filesystem overrides
//!
//! Config, palette and the SVG template are compiled into the binary. Each
//! can be overridden from the filesystem:
//!
//! - If no path is configured: use the embedded asset (no filesystem access)
//! - If a path is configured and exists: use the file
//! - If a path is configured but missing: fall back to the embedded asset
//!
//! Fonts are never embedded; `FONTS_DIR` adds font files on top of the
//! system fonts.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded default config and palette
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
#[include = "palette.yaml"]
struct EmbeddedConfig;

/// Embedded SVG templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.svg"]
struct EmbeddedTemplates;

pub const CONFIG_NAME: &str = "config.yaml";
pub const PALETTE_NAME: &str = "palette.yaml";
pub const PATTERN_TEMPLATE: &str = "pattern.svg";

/// Groups of embedded assets for `init` and listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Config,
    Palette,
    Templates,
}

/// Files written and skipped by [`AssetLoader::init`]
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem overrides
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file (CONFIG_FILE env var or --config)
    config_file: Option<PathBuf>,
    /// External palette file (PALETTE_FILE env var or --palette)
    palette_file: Option<PathBuf>,
    /// External fonts directory (FONTS_DIR env var)
    fonts_dir: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding override was given.
    pub fn new(
        config_file: Option<PathBuf>,
        palette_file: Option<PathBuf>,
        fonts_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            config_file,
            palette_file,
            fonts_dir,
        }
    }

    /// Create a loader from `CONFIG_FILE`, `PALETTE_FILE` and `FONTS_DIR`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
            std::env::var("PALETTE_FILE").ok().map(PathBuf::from),
            std::env::var("FONTS_DIR").ok().map(PathBuf::from),
        )
    }

    /// Replace the config override (command line beats environment)
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.config_file = path;
        }
        self
    }

    /// Replace the palette override (command line beats environment)
    pub fn with_palette_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.palette_file = path;
        }
        self
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn palette_file(&self) -> Option<&Path> {
        self.palette_file.as_deref()
    }

    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    /// Raw config bytes: the override file when it exists, else embedded
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        match self.config_file.as_deref() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Reading config file");
                Ok(Cow::Owned(fs::read(path)?))
            }
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using embedded default");
                read_embedded_config(CONFIG_NAME)
            }
            None => read_embedded_config(CONFIG_NAME),
        }
    }

    /// Config as UTF-8 text
    pub fn read_config_string(&self) -> io::Result<String> {
        into_string(self.read_config()?)
    }

    /// Read the palette catalog
    ///
    /// `fallback` is the palette path named in the config file; the loader's
    /// own override (env var or command line) takes precedence over it.
    /// Unlike the config, a named palette file that is missing is an error.
    pub fn read_palette_string(&self, fallback: Option<&Path>) -> io::Result<String> {
        if let Some(path) = self.palette_file.as_deref().or(fallback) {
            tracing::trace!(path = %path.display(), "Loading palette from filesystem");
            return fs::read_to_string(path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {e}", path.display()))
            });
        }

        into_string(read_embedded_config(PALETTE_NAME)?)
    }

    /// Read an embedded SVG template
    pub fn read_template(&self, name: &str) -> io::Result<String> {
        let data = EmbeddedTemplates::get(name)
            .map(|f| f.data)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("Template not found: {name}"))
            })?;
        into_string(data)
    }

    /// Font files from `FONTS_DIR`, sorted by file name
    ///
    /// Unreadable entries are skipped; a missing directory yields no fonts.
    pub fn get_fonts(&self) -> Vec<(String, Cow<'static, [u8]>)> {
        let Some(entries) = self.fonts_dir.as_deref().and_then(|dir| fs::read_dir(dir).ok()) else {
            return Vec::new();
        };

        let mut fonts: Vec<_> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| is_font_file(path))
            .filter_map(|path| {
                let data = fs::read(&path).ok()?;
                let name = path.file_name()?.to_string_lossy().into_owned();
                tracing::trace!(font = %name, "Found font file");
                Some((name, Cow::Owned(data)))
            })
            .collect();

        fonts.sort_by(|a, b| a.0.cmp(&b.0));
        fonts
    }

    /// Extract embedded assets to the filesystem (init command)
    ///
    /// Config and palette go to their override paths, or the current
    /// directory if not set. Templates go to `./templates/`.
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Config => {
                    let target = self.config_file.as_deref().unwrap_or(Path::new(CONFIG_NAME));
                    let data = read_embedded_config(CONFIG_NAME)?;
                    extract(target, &data, force, &mut report)?;
                }
                AssetCategory::Palette => {
                    let target = self.palette_file.as_deref().unwrap_or(Path::new(PALETTE_NAME));
                    let data = read_embedded_config(PALETTE_NAME)?;
                    extract(target, &data, force, &mut report)?;
                }
                AssetCategory::Templates => {
                    for name in EmbeddedTemplates::iter() {
                        let Some(file) = EmbeddedTemplates::get(&name) else {
                            continue;
                        };
                        let target = Path::new("templates").join(name.as_ref());
                        extract(&target, &file.data, force, &mut report)?;
                    }
                }
            }
        }

        Ok(report)
    }

    /// Names of the embedded assets in `category`
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Config => vec![CONFIG_NAME.to_string()],
            AssetCategory::Palette => vec![PALETTE_NAME.to_string()],
            AssetCategory::Templates => EmbeddedTemplates::iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn read_embedded_config(name: &str) -> io::Result<Cow<'static, [u8]>> {
    EmbeddedConfig::get(name)
        .map(|f| {
            tracing::trace!(asset = name, "Loading from embedded assets");
            f.data
        })
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("Embedded {name} not found")))
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "ttf" | "otf" | "woff" | "woff2"))
}

/// Write `data` to `target` unless it exists (or `force` is set)
fn extract(target: &Path, data: &[u8], force: bool, report: &mut InitReport) -> io::Result<()> {
    let shown = target.display().to_string();
    if target.exists() && !force {
        report.skipped.push(shown);
        return Ok(());
    }
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)?,
        _ => {}
    }
    fs::write(target, data)?;
    report.written.push(shown);
    Ok(())
}

fn into_string(bytes: Cow<'static, [u8]>) -> io::Result<String> {
    String::from_utf8(bytes.into_owned()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
