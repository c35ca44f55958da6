//! Offline vocabulary: the categorized word bank and the corpus built from it.

use crate::config::ConfigError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const BUILTIN_BANK: &str = include_str!("../../assets/word_bank.toml");

/// Words grouped by category, as supplied by the content team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordBank {
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
}

impl WordBank {
    /// Creates a bank from a category map.
    #[instrument(skip(categories), fields(count = categories.len()))]
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Self {
        Self { categories }
    }

    /// The bank shipped with the game.
    #[instrument]
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_BANK)
    }

    /// Parses a bank from TOML with a `[categories]` table of word arrays.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let bank: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse word bank: {}", e)))?;
        debug!(categories = bank.categories.len(), "Word bank parsed");
        Ok(bank)
    }

    /// Loads a bank from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read word bank: {}", e)))?;
        let bank = Self::from_toml_str(&content)?;
        info!(categories = bank.categories.len(), "Word bank loaded");
        Ok(bank)
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Words of one category.
    pub fn words_in(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Every word across all categories.
    pub fn all_words(&self) -> impl Iterator<Item = &str> {
        self.categories.values().flatten().map(String::as_str)
    }

    /// Picks up to `count` distinct entries from `category`.
    ///
    /// Returns an empty list for an unknown category.
    #[instrument(skip(self, rng))]
    pub fn choose<R: Rng + ?Sized>(&self, category: &str, count: usize, rng: &mut R) -> Vec<String> {
        let Some(words) = self.words_in(category) else {
            warn!(category, "Unknown word bank category");
            return Vec::new();
        };
        let picked: Vec<String> = words.choose_multiple(rng, count).cloned().collect();
        debug!(category, picked = picked.len(), "Words chosen");
        picked
    }
}

/// Case-insensitive set of words known to be valid without asking anyone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    words: HashSet<String>,
}

impl Corpus {
    /// Builds a corpus from arbitrary words.
    #[instrument(skip(words))]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| normalize(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        debug!(size = words.len(), "Corpus built");
        Self { words }
    }

    /// Builds a corpus from every category of `bank`.
    #[instrument(skip(bank))]
    pub fn from_bank(bank: &WordBank) -> Self {
        Self::from_words(bank.all_words())
    }

    /// Membership test, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    /// Adds a word. Returns `false` if it was already known.
    #[instrument(skip(self))]
    pub fn insert(&mut self, word: &str) -> bool {
        let word = normalize(word);
        if word.is_empty() {
            return false;
        }
        self.words.insert(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` when no words are known.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercased, trimmed form used for every corpus and cache key.
pub(crate) fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
