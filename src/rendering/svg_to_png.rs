use crate::error::RenderError;
use resvg::usvg::{self, Transform};
use std::io::Cursor;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Renders pattern SVGs to PNG.
///
/// The SVG is rasterized at its own size onto a white canvas and written as
/// an 8-bit RGB PNG, then re-compressed with oxipng.
pub struct SvgRenderer {
    /// Font database for text rendering
    fontdb: Arc<fontdb::Database>,
}

impl SvgRenderer {
    /// Create a new SVG renderer with fonts loaded from the provided data
    pub fn with_fonts(fonts: Vec<(String, std::borrow::Cow<'static, [u8]>)>) -> Self {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data.into_owned());
            tracing::debug!(font = %name, "Loaded font");
        }

        // Label fonts come from the system unless FONTS_DIR provides them
        fontdb.load_system_fonts();

        tracing::info!(font_count = fontdb.len(), "Loaded fonts for label rendering");

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a new SVG renderer with no custom fonts (system fonts only)
    pub fn new() -> Self {
        Self::with_fonts(Vec::new())
    }

    /// Number of loaded font faces
    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render SVG to an optimized PNG
    pub fn render_png(&self, svg_data: &[u8]) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.rasterize_svg(svg_data)?;
        let rgb = rgba_to_rgb(pixmap.data());

        // Fast settings, oxipng re-compresses
        let png_bytes = encode_png(pixmap.width(), pixmap.height(), &rgb)?;

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);

        tracing::debug!(
            width = pixmap.width(),
            height = pixmap.height(),
            bytes = optimized.len(),
            "Rendered PNG"
        );
        Ok(optimized)
    }

    /// Parse and rasterize SVG to an RGBA pixmap at its natural size
    fn rasterize_svg(&self, svg_data: &[u8]) -> Result<Pixmap, RenderError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let size = tree.size().to_int_size();
        let mut pixmap =
            Pixmap::new(size.width(), size.height()).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drop the alpha channel, compositing against white.
///
/// The canvas is filled white before rendering so alpha is normally 255;
/// tiny-skia stores premultiplied color, which composites as `c + (255 - a)`.
fn rgba_to_rgb(rgba_data: &[u8]) -> Vec<u8> {
    rgba_data
        .chunks_exact(4)
        .flat_map(|pixel| {
            let inv = 255 - pixel[3];
            [
                pixel[0].saturating_add(inv),
                pixel[1].saturating_add(inv),
                pixel[2].saturating_add(inv),
            ]
        })
        .collect()
}

fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
