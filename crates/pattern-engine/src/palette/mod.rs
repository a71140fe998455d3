//! Reference catalog, palette selection and the active color map.
//!
//! - [`ReferencePalette`]: the fixed, ordered bead catalog
//! - [`nearest_color()`]: Euclidean nearest-color search, earliest wins ties
//! - [`FrequencyTable`] and [`select_palette()`]: top-K selection with
//!   catalog-ordered display labels
//! - [`ActiveColorMap`]: the colors chosen for one generated pattern

mod active;
mod error;
mod reference;
mod selector;

pub use active::{ActiveColorMap, ColorAssignment, LegendEntry};
pub use error::{PaletteError, ParseColorError};
pub use reference::{nearest_color, PaletteEntry, ReferencePalette, Swatch};
pub use selector::{display_label, select_palette, FrequencyTable};
