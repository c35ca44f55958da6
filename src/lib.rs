//! Word Link - the puzzle core of a children's spelling game.
//!
//! # Architecture
//!
//! - **Grid**: greedy crossword placement of a word list ([`place`])
//! - **Validation**: offline corpus, cache and remote dictionary ([`WordValidator`])
//! - **Puzzle**: the Word Link guessing state machine ([`PuzzleSession`])
//! - **Resume**: hand-off of hearts and score across mini-game navigations
//!   ([`ResumptionGateway`])
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use word_link::{Corpus, HttpDictionary, PuzzleSession, SessionSettings, WordBank, WordValidator, place};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let words = vec!["cat".to_string(), "map".to_string()];
//! let grid = place(&words)?;
//!
//! let bank = WordBank::builtin()?;
//! let lookup = Arc::new(HttpDictionary::new("https://api.dictionaryapi.dev/api/v2/entries/en/")?);
//! let validator = WordValidator::new(Corpus::from_bank(&bank), lookup);
//!
//! let mut session = PuzzleSession::new(words, SessionSettings::default())?;
//! let outcome = session.submit_guess("cat", &validator).await?;
//! # let _ = (grid, outcome);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod grid;
mod puzzle;
mod resume;
mod validation;

// Crate-level exports - Configuration
pub use config::{
    ConfigError, DICTIONARY_URL_ENV, DictionarySettings, GameConfig, HandOffSettings,
    STORAGE_DIR_ENV, SessionSettings,
};

// Crate-level exports - Grid placement
pub use grid::{Direction, EMPTY_CELL, GridBounds, Letter, PlacedWord, PlacementError, place, render};

// Crate-level exports - Word validation
pub use validation::{
    Corpus, DictionaryLookup, HttpDictionary, LookupError, MIN_WORD_LEN, WordBank, WordValidator,
};

// Crate-level exports - Word Link session
pub use puzzle::{
    GuessOutcome, HintOutcome, PuzzleError, PuzzleSession, SessionEvent, SessionPhase, Submission,
    WordTiles,
};

// Crate-level exports - Session hand-off
pub use resume::{
    BONUS_HEARTS_PARAM, FileStorage, HEARTS_PARAM, HandOff, MemoryStorage, RETURN_TO_PARAM,
    RETURN_URL_PARAM, ResumeParams, ResumeTarget, ResumptionGateway, ResumptionSnapshot,
    ReturnTicket, SCREEN_PARAM, STORAGE_KEY_PREFIX, SessionStorage, StorageError,
};

/// URL type used throughout the hand-off API.
pub use reqwest::Url;
