//! The state carried across a mini-game round trip.

use super::error::StorageError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Prefix of the session-storage key holding a suspended snapshot.
pub const STORAGE_KEY_PREFIX: &str = "heartsPendingRestore";

/// Gameplay phase control returns to after a mini-game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResumeTarget {
    /// The Word Link crossword phase.
    WordLink,
    /// The Mad Libs phase that follows Word Link.
    MadLib,
}

impl ResumeTarget {
    /// Target used when a return trip carries no phase tag at all.
    ///
    /// Older mini-game pages only ever returned to Mad Libs.
    pub const LEGACY_DEFAULT: Self = Self::MadLib;

    /// Stable identifier used in URLs and storage keys.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Name of this phase's boolean resume flag in URLs.
    pub fn resume_flag(self) -> &'static str {
        match self {
            Self::WordLink => "resumeWordLink",
            Self::MadLib => "resumeMadLib",
        }
    }

    /// Session-storage key for a snapshot suspended from this phase.
    pub fn storage_key(self) -> String {
        format!("{}:{}", STORAGE_KEY_PREFIX, self.as_str())
    }
}

/// Hearts, score and resume point captured when hearts run out.
///
/// Written just before navigating away and read once on return. It is not
/// protected against tampering.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumptionSnapshot {
    /// Heart count before any mini-game bonus.
    hearts: u32,
    /// Score at suspension.
    score: u32,
    /// Phase to return to.
    resume_target: ResumeTarget,
    /// Hearts earned in the mini-game, not yet added to `hearts`.
    #[serde(default)]
    bonus_hearts_pending: u32,
    /// Word list of the suspended phase, in play order.
    #[serde(default)]
    words: Vec<String>,
    /// Word being guessed at suspension.
    #[serde(default)]
    word_index: usize,
}

impl ResumptionSnapshot {
    /// Creates a snapshot with no pending bonus and no word list.
    #[instrument]
    pub fn new(hearts: u32, score: u32, resume_target: ResumeTarget) -> Self {
        Self {
            hearts,
            score,
            resume_target,
            bonus_hearts_pending: 0,
            words: Vec::new(),
            word_index: 0,
        }
    }

    /// Attaches the word list and current word.
    #[instrument(skip(self, words))]
    pub fn with_words(mut self, words: Vec<String>, word_index: usize) -> Self {
        self.words = words;
        self.word_index = word_index;
        self
    }

    /// Sets the mini-game bonus still to be applied.
    #[instrument(skip(self))]
    pub fn with_bonus_hearts(mut self, bonus: u32) -> Self {
        self.bonus_hearts_pending = bonus;
        self
    }

    /// Hearts once the pending bonus is applied.
    pub fn total_hearts(&self) -> u32 {
        self.hearts.saturating_add(self.bonus_hearts_pending)
    }

    /// Encodes the snapshot for session storage.
    #[instrument(skip(self))]
    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot read from session storage.
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }
}
