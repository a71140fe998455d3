pub mod image_loader;
pub mod legend;
pub mod pattern_service;

pub use image_loader::{center_crop, decode_image, prepare_pixels};
pub use legend::{LegendColor, LegendDocument};
pub use pattern_service::{
    EditAction, EditReport, EditTarget, LabelEdit, PatternService, RenderedPattern,
};
