//! Layered "is this a real word?" check.

use super::corpus::{Corpus, normalize};
use super::lookup::DictionaryLookup;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Words shorter than this are never valid.
pub const MIN_WORD_LEN: usize = 2;

/// Validates words against the offline corpus, then a result cache, then a
/// remote dictionary, stopping at the first tier that answers.
///
/// Remote failures are fail-closed: the word counts as invalid and that
/// verdict is cached like any other. Callers always get a plain `bool`.
///
/// Each word has one cache cell. Overlapping calls for the same word share a
/// single remote lookup.
pub struct WordValidator {
    corpus: RwLock<Corpus>,
    cache: Mutex<HashMap<String, Arc<OnceCell<bool>>>>,
    lookup: Arc<dyn DictionaryLookup>,
}

impl std::fmt::Debug for WordValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordValidator")
            .field("corpus_len", &self.corpus_len())
            .field("cached", &self.cache_len())
            .finish_non_exhaustive()
    }
}

impl WordValidator {
    /// Creates a validator over `corpus` backed by `lookup`.
    #[instrument(skip(corpus, lookup), fields(corpus_len = corpus.len()))]
    pub fn new(corpus: Corpus, lookup: Arc<dyn DictionaryLookup>) -> Self {
        info!("Creating word validator");
        Self {
            corpus: RwLock::new(corpus),
            cache: Mutex::new(HashMap::new()),
            lookup,
        }
    }

    /// Returns whether `word` is a real word.
    ///
    /// Only the remote tier suspends. A word is looked up remotely at most
    /// once per validator, even when calls overlap. A lookup abandoned by a
    /// dropped caller is retried by the next one.
    #[instrument(skip(self))]
    pub async fn is_valid(&self, word: &str) -> bool {
        let word = normalize(word);

        if word.chars().count() < MIN_WORD_LEN {
            debug!("Too short, rejecting");
            return false;
        }

        if self.corpus_contains(&word) {
            debug!("Found in local corpus");
            return true;
        }

        let cell = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(word.clone())
            .or_default()
            .clone();

        if let Some(cached) = cell.get() {
            debug!(cached, "Answered from cache");
            return *cached;
        }

        *cell.get_or_init(|| self.remote_verdict(&word)).await
    }

    async fn remote_verdict(&self, word: &str) -> bool {
        match self.lookup.lookup(word).await {
            Ok(found) => {
                debug!(found, "Remote lookup answered");
                found
            }
            Err(e) => {
                warn!(error = %e, "Remote lookup failed, treating word as invalid");
                false
            }
        }
    }

    /// Adds newly earned vocabulary to the corpus. The cache is left alone.
    ///
    /// Returns `false` if the word was already known.
    #[instrument(skip(self))]
    pub fn register_word(&self, word: &str) -> bool {
        let added = self
            .corpus
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(word);
        if added {
            info!(word, "Registered word in corpus");
        }
        added
    }

    /// Cached remote verdict for `word`, if any.
    pub fn cached(&self, word: &str) -> Option<bool> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&normalize(word))
            .and_then(|cell| cell.get().copied())
    }

    /// Number of words in the corpus.
    pub fn corpus_len(&self) -> usize {
        self.corpus.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of cached remote verdicts.
    pub fn cache_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    fn corpus_contains(&self, word: &str) -> bool {
        self.corpus
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(word)
    }
}
