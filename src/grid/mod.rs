//! Crossword-style layout of a word list on an integer grid.

mod placer;
mod render;
mod types;

pub use placer::{PlacementError, place};
pub use render::{EMPTY_CELL, render};
pub use types::{Direction, GridBounds, Letter, PlacedWord};
