//! Phases, outcomes and notifications of a Word Link session.

use serde::{Deserialize, Serialize};

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// The player is working on the word at this index.
    Guessing {
        /// Index into the sorted word list.
        word_index: usize,
    },
    /// Hearts ran out on the word at this index.
    Exhausted {
        /// Index into the sorted word list.
        word_index: usize,
    },
    /// Every word has been guessed.
    AllWordsSolved,
}

/// Result of a completed guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// The guess was the target word.
    Correct {
        /// Points awarded.
        points: u32,
        /// `true` if that was the last word.
        phase_complete: bool,
    },
    /// A real word, but not the target. The word stays the same.
    BonusWord {
        /// Points awarded.
        points: u32,
    },
    /// Not a word. One heart was lost.
    Wrong {
        /// Hearts remaining.
        hearts_left: u32,
    },
    /// Not a word, and that was the last heart.
    OutOfHearts,
}

/// Result of asking for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintOutcome {
    /// A letter was revealed.
    Revealed {
        /// Position within the word.
        position: usize,
        /// The revealed letter.
        letter: char,
    },
    /// The hint allowance for this word is used up.
    NoHintsLeft,
    /// Every letter is already showing.
    AllRevealed,
}

/// Notification for the renderer. Drain with
/// [`PuzzleSession::take_events`](super::PuzzleSession::take_events).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new word is up.
    WordStarted {
        /// Index into the sorted word list.
        word_index: usize,
        /// Letters in the word.
        length: usize,
    },
    /// The target word was guessed.
    WordSolved {
        /// The solved word.
        word: String,
        /// Its index.
        word_index: usize,
        /// Score afterwards.
        score: u32,
    },
    /// A different real word was formed.
    BonusWord {
        /// The word formed.
        word: String,
        /// Score afterwards.
        score: u32,
    },
    /// A wrong guess cost a heart.
    HeartLost {
        /// The rejected guess.
        guess: String,
        /// Hearts remaining.
        hearts: u32,
    },
    /// A hint revealed a letter.
    HintRevealed {
        /// Position within the word.
        position: usize,
        /// The revealed letter.
        letter: char,
    },
    /// Tiles went back to the pool and were reshuffled.
    TilesRefreshed,
    /// Hearts were adjusted from outside the game.
    HeartsChanged {
        /// New heart count.
        hearts: u32,
    },
    /// Every word is solved.
    PhaseComplete {
        /// Final score.
        score: u32,
    },
    /// Hearts reached zero. The caller should hand off.
    HeartsExhausted {
        /// Word being guessed when hearts ran out.
        word_index: usize,
        /// Score at that point.
        score: u32,
    },
}
