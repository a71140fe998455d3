//! Color value type
//!
//! Everything in the pattern pipeline works on gamma-encoded 8-bit RGB
//! triples: the decoded photo, the reference catalog and the cell fills.
//!
//! # Example
//!
//! ```
//! use pattern_engine::Rgb;
//!
//! let salmon: Rgb = "#FFE2E2".parse().unwrap();
//! assert_eq!(salmon, Rgb::new(255, 226, 226));
//! ```

mod rgb;

pub use rgb::{Rgb, TextTone};
