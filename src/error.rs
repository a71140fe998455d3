use pattern_engine::PatternError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Palette error: {0}")]
    Palette(String),

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Image too small: {width}x{height}")]
    ImageTooSmall { width: usize, height: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Legend encode error: {0}")]
    Legend(#[from] serde_json::Error),
}
