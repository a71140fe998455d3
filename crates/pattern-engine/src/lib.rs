//! pattern-engine: numbered color-by-cell patterns from photographs
//!
//! This library turns a fixed-size RGBA pixel buffer into a diamond painting
//! pattern: a grid of cells, each filled with one of a small set of catalog
//! colors and labelled with a short symbol. It also provides the interactive
//! selection tools and label toggles used to edit a generated pattern.
//!
//! # Quick Start
//!
//! ```
//! use pattern_engine::{GridConfig, PatternSession, ReferencePalette, Rgb, PixelBuffer};
//!
//! let palette = ReferencePalette::from_hex(&[("R", "#FF0000"), ("B", "#0000FF")]).unwrap();
//! let config = GridConfig::new(2, 2, 2, 9);
//! let mut session = PatternSession::new(config, palette).unwrap();
//!
//! let red = Rgb::new(255, 0, 0);
//! let blue = Rgb::new(0, 0, 255);
//! session
//!     .generate(PixelBuffer::from_colors(&[red, red, blue, red], 2, 2).unwrap())
//!     .unwrap();
//!
//! assert_eq!(session.grid().get(0, 0).unwrap().label(), Some("1"));
//! assert_eq!(session.grid().get(0, 1).unwrap().label(), Some("2"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer (W x H RGBA)
//!     |
//!     v
//! nearest catalog color per pixel       (Euclidean RGB, earliest wins ties)
//!     |
//!     v
//! FrequencyTable -> select_palette()    (top-K by count, labels in catalog order)
//!     |
//!     v
//! Grid of Cells                         (fill, label, tone, background flag)
//!     |
//!     v
//! SelectionSet                          (connected region / lasso)
//!     |
//!     v
//! hide_labels() / restore_labels()
//! ```
//!
//! # Labels
//!
//! Selected colors are labelled `"1"` to `"9"`, then with bijective base-26
//! letter codes: `"A"` to `"Z"`, `"AA"`, `"AB"`, and so on. Labels follow the
//! catalog order of the selected colors, not their frequency. See
//! [`display_label()`].
//!
//! # Background cells
//!
//! A background cell has its label hidden. Cells become background cells
//! either because the user hid them or because their nearest catalog color
//! did not make the palette cut, in which case the cell keeps the raw pixel
//! color and has no label at all. [`restore_labels()`] recomputes a label
//! from the source pixel against the active colors only.

pub mod color;
pub mod error;
pub mod grid;
pub mod labels;
pub mod palette;
pub mod selection;
pub mod session;

pub use color::{Rgb, TextTone};
pub use error::{GridError, PatternError};
pub use grid::{
    build_grid, generate_pattern, quantize, Cell, CellCoord, Grid, GridConfig, Pattern,
    PixelBuffer,
};
pub use labels::{hide_labels, restore_labels};
pub use palette::{
    display_label, nearest_color, select_palette, ActiveColorMap, ColorAssignment,
    FrequencyTable, LegendEntry, PaletteEntry, PaletteError, ParseColorError, ReferencePalette,
    Swatch,
};
pub use selection::{
    connected_region, lasso_select, parse_polygon, point_in_polygon, stage_to_cell,
    LassoGesture, SelectionSet, StagePoint, ToolMode, MIN_LASSO_POINTS,
};
pub use session::{PatternSession, SessionEvent, SessionObserver};
