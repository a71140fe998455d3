pub mod svg;
pub mod svg_to_png;

pub use svg::PatternSvg;
pub use svg_to_png::SvgRenderer;
