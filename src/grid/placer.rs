//! Greedy first-fit crossword placement.
//!
//! Words are placed in input order. Each word after the first tries to cross
//! an already placed word on a shared letter, scanning placed words in
//! placement order and their letters left to right. The first crossing that
//! does not put two different characters on one cell wins. Words that cannot
//! cross anything are parked beside the previous word instead.

use super::types::{Direction, GridBounds, PlacedWord};
use std::collections::HashMap;
use tracing::{debug, info, instrument, trace};

/// Cells between a parked word and the word it was parked beside, on top of
/// that word's length.
const FALLBACK_GAP: i32 = 3;

/// Error returned for input the placer cannot lay out.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PlacementError {
    /// No words were supplied.
    #[display("Cannot place an empty word list")]
    EmptyInput,
}

impl std::error::Error for PlacementError {}

/// Occupied cells of the grid under construction.
#[derive(Debug, Default)]
struct Occupancy {
    cells: HashMap<(i32, i32), char>,
}

impl Occupancy {
    fn fits(&self, candidate: &PlacedWord) -> bool {
        candidate.letters().iter().all(|l| {
            self.cells
                .get(&(l.x(), l.y()))
                .is_none_or(|existing| *existing == l.ch())
        })
    }

    fn occupy(&mut self, word: &PlacedWord) {
        for l in word.letters() {
            self.cells.insert((l.x(), l.y()), l.ch());
        }
    }
}

/// Lays out `words` on a grid whose smallest `x` and `y` are both zero.
///
/// The result is deterministic for a given input order and holds one
/// [`PlacedWord`] per input word, in input order. Duplicate words are placed
/// independently.
///
/// # Errors
///
/// Returns [`PlacementError::EmptyInput`] when `words` is empty.
#[instrument(skip(words), fields(count = words.len()))]
pub fn place<S: AsRef<str>>(words: &[S]) -> Result<Vec<PlacedWord>, PlacementError> {
    let Some((first, rest)) = words.split_first() else {
        return Err(PlacementError::EmptyInput);
    };

    let mut occupancy = Occupancy::default();
    let mut placed = Vec::with_capacity(words.len());

    let head = PlacedWord::new(first.as_ref(), (0, 0), Direction::Horizontal);
    occupancy.occupy(&head);
    placed.push(head);

    for word in rest {
        let word = word.as_ref();
        let next = match find_crossing(&placed, &occupancy, word) {
            Some(crossing) => crossing,
            None => park_beside_last(&placed, &occupancy, word),
        };
        occupancy.occupy(&next);
        placed.push(next);
    }

    normalize(&mut placed);
    info!(count = placed.len(), "Placed words on grid");
    Ok(placed)
}

/// Finds the first conflict-free placement of `word` crossing a placed word.
#[instrument(skip(placed, occupancy))]
fn find_crossing(placed: &[PlacedWord], occupancy: &Occupancy, word: &str) -> Option<PlacedWord> {
    for anchor in placed {
        let direction = anchor.direction().perpendicular();
        let (dx, dy) = direction.step();

        for letter in anchor.letters() {
            for (j, ch) in word.chars().enumerate() {
                if ch != letter.ch() {
                    continue;
                }
                let j = j as i32;
                let origin = (letter.x() - dx * j, letter.y() - dy * j);
                let candidate = PlacedWord::new(word, origin, direction);
                if occupancy.fits(&candidate) {
                    debug!(
                        anchor = anchor.word(),
                        shared = %ch,
                        ?origin,
                        %direction,
                        "Crossing found"
                    );
                    return Some(candidate);
                }
                trace!(anchor = anchor.word(), ?origin, "Crossing collides, skipping");
            }
        }
    }
    None
}

/// Places `word` beside the most recently placed word, perpendicular to it.
///
/// The offset is the previous word's length plus [`FALLBACK_GAP`]. If that
/// spot still collides, the word keeps moving by the same offset until it
/// fits, which always happens once it is past every occupied cell.
#[instrument(skip(placed, occupancy))]
fn park_beside_last(placed: &[PlacedWord], occupancy: &Occupancy, word: &str) -> PlacedWord {
    let (origin, direction, offset) = match placed.last() {
        Some(last) => {
            let gap = last.len() as i32 + FALLBACK_GAP;
            let offset = match last.direction() {
                Direction::Horizontal => (0, gap),
                Direction::Vertical => (gap, 0),
            };
            let origin = (last.origin().0 + offset.0, last.origin().1 + offset.1);
            (origin, last.direction().perpendicular(), offset)
        }
        None => ((0, 0), Direction::Horizontal, (0, FALLBACK_GAP)),
    };

    let mut candidate = PlacedWord::new(word, origin, direction);
    while !occupancy.fits(&candidate) {
        let next = (
            candidate.origin().0 + offset.0,
            candidate.origin().1 + offset.1,
        );
        trace!(?next, "Parked spot collides, stepping further out");
        candidate = PlacedWord::new(word, next, direction);
    }

    debug!(origin = ?candidate.origin(), %direction, "No crossing, parked beside previous word");
    candidate
}

/// Shifts every word so the smallest `x` and `y` become zero.
#[instrument(skip(placed))]
fn normalize(placed: &mut [PlacedWord]) {
    let Some(bounds) = GridBounds::of(placed) else {
        return;
    };
    let (dx, dy) = (-bounds.min_x, -bounds.min_y);
    if dx == 0 && dy == 0 {
        return;
    }
    debug!(dx, dy, "Normalizing grid origin");
    for word in placed {
        word.translate(dx, dy);
    }
}
