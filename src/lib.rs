//! Diamond Pattern - numbered diamond painting patterns from photographs
//!
//! Loads the palette catalog and configuration, prepares source images and
//! renders the patterns produced by `pattern-engine` to SVG, PNG and a JSON
//! legend. This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
