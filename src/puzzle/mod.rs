//! The Word Link guessing phase: hearts, score, hints and tile pool.

mod error;
mod events;
mod session;
mod tiles;

pub use error::PuzzleError;
pub use events::{GuessOutcome, HintOutcome, SessionEvent, SessionPhase};
pub use session::{PuzzleSession, Submission};
pub use tiles::WordTiles;
