//! Plain-text rendering of a placed grid.

use super::types::{GridBounds, PlacedWord};
use tracing::instrument;

/// Character drawn for cells no word covers.
pub const EMPTY_CELL: char = '.';

/// Draws `words` as newline-separated rows, one character per cell.
///
/// Coordinates are taken relative to the grid's bounding box, so this works
/// on normalized and unnormalized layouts alike. Returns an empty string when
/// there are no letters.
#[instrument(skip(words), fields(count = words.len()))]
pub fn render(words: &[PlacedWord]) -> String {
    let Some(bounds) = GridBounds::of(words) else {
        return String::new();
    };

    let mut rows = vec![vec![EMPTY_CELL; bounds.width()]; bounds.height()];
    for letter in words.iter().flat_map(|w| w.letters()) {
        let col = (letter.x() - bounds.min_x) as usize;
        let row = (letter.y() - bounds.min_y) as usize;
        rows[row][col] = letter.ch();
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
