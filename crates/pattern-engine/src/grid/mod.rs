//! Pixel buffers, grid configuration and the cell grid itself.

mod builder;
mod cell;
mod config;
mod pixels;

pub use builder::{build_grid, generate_pattern, quantize, Grid, Pattern};
pub use cell::{Cell, CellCoord};
pub use config::GridConfig;
pub use pixels::PixelBuffer;
