//! Assertion helpers for tests.

use pattern_engine::{Grid, PatternSession};
use pretty_assertions::assert_eq;

/// Assert bytes are a PNG image
pub fn assert_png(data: &[u8]) {
    assert!(
        data.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        data.len(),
        &data[..8.min(data.len())]
    );
}

/// Assert every cell is background exactly when its label is hidden
pub fn assert_label_invariant(grid: &Grid) {
    for cell in grid {
        assert_eq!(
            cell.is_background(),
            !cell.label_visible(),
            "cell {} breaks the background/label invariant",
            cell.coord()
        );
    }
}

/// Assert the session has no pending selection and no active tool
pub fn assert_idle(session: &PatternSession) {
    assert!(
        session.selection().is_empty(),
        "Expected empty selection, got {} cells",
        session.selection().len()
    );
    assert!(!session.tool().is_active(), "Expected no active tool");
}
