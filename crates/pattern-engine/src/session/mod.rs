//! The editing session: one context object owning all mutable pattern state.
//!
//! ```text
//! generate ──> Grid + ActiveColorMap + PixelBuffer
//!                 │
//! pointer / select_* ──> SelectionSet ──> hide_labels / restore_labels
//!                                              │
//!                             SessionObserver <┘ (SessionEvent)
//! ```

mod events;
mod pattern_session;

pub use events::{SessionEvent, SessionObserver};
pub use pattern_session::PatternSession;
