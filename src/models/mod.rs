pub mod config;
pub mod palette;

pub use config::{AppConfig, RenderConfig};
pub use palette::{load_palette, parse_palette};
