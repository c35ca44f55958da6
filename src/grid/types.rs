//! Core layout types for the crossword grid.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Orientation of a placed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Letters run left to right (increasing `x`).
    #[strum(serialize = "horizontal")]
    Horizontal,
    /// Letters run top to bottom (increasing `y`).
    #[strum(serialize = "vertical")]
    Vertical,
}

impl Direction {
    /// Returns the perpendicular direction.
    #[instrument]
    pub fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Unit step `(dx, dy)` along this direction.
    pub fn step(self) -> (i32, i32) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Vertical => (0, 1),
        }
    }
}

/// A single letter at a grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Letter {
    x: i32,
    y: i32,
    ch: char,
}

impl Letter {
    /// Column of the letter.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Row of the letter.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// The character drawn in this cell.
    pub fn ch(&self) -> char {
        self.ch
    }

    /// Returns `true` if both letters sit on the same cell.
    pub fn same_cell(&self, other: &Letter) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub(super) fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

/// A word laid out on the grid.
///
/// Invariants upheld by construction:
/// - `letters().len()` equals the number of characters in `word()`
/// - `letters()[i].ch()` is the `i`th character of `word()`
/// - consecutive letters are one cell apart along `direction()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    word: String,
    origin: (i32, i32),
    direction: Direction,
    letters: Vec<Letter>,
}

impl PlacedWord {
    /// Lays out `word` starting at `origin` and running along `direction`.
    #[instrument(fields(word = %word))]
    pub fn new(word: &str, origin: (i32, i32), direction: Direction) -> Self {
        let (dx, dy) = direction.step();
        let letters = word
            .chars()
            .zip(0..)
            .map(|(ch, i)| Letter::new(origin.0 + dx * i, origin.1 + dy * i, ch))
            .collect();
        Self {
            word: word.to_string(),
            origin,
            direction,
            letters,
        }
    }

    /// The placed word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Coordinates of the first letter.
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Direction the word runs in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Letters in word order.
    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` for a zero-length word.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub(super) fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = (self.origin.0 + dx, self.origin.1 + dy);
        for letter in &mut self.letters {
            letter.translate(dx, dy);
        }
    }
}

/// Bounding box of a set of placed words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Smallest `x` of any letter.
    pub min_x: i32,
    /// Smallest `y` of any letter.
    pub min_y: i32,
    /// Largest `x` of any letter.
    pub max_x: i32,
    /// Largest `y` of any letter.
    pub max_y: i32,
}

impl GridBounds {
    /// Computes the bounds of `words`, or `None` when there are no letters.
    #[instrument(skip(words), fields(count = words.len()))]
    pub fn of(words: &[PlacedWord]) -> Option<Self> {
        let mut letters = words.iter().flat_map(|w| w.letters().iter());
        let first = letters.next()?;
        let init = Self {
            min_x: first.x(),
            min_y: first.y(),
            max_x: first.x(),
            max_y: first.y(),
        };
        Some(letters.fold(init, |b, l| Self {
            min_x: b.min_x.min(l.x()),
            min_y: b.min_y.min(l.y()),
            max_x: b.max_x.max(l.x()),
            max_y: b.max_y.max(l.y()),
        }))
    }

    /// Number of columns spanned.
    pub fn width(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    /// Number of rows spanned.
    pub fn height(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }
}
