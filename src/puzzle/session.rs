//! The Word Link state machine.

use super::error::PuzzleError;
use super::events::{GuessOutcome, HintOutcome, SessionEvent, SessionPhase};
use super::tiles::WordTiles;
use crate::config::SessionSettings;
use crate::resume::{ResumeTarget, ResumptionSnapshot};
use crate::validation::WordValidator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

/// A guess that has been taken in and awaits its validation verdict.
///
/// Obtained from [`PuzzleSession::begin_submission`] and handed back to
/// [`PuzzleSession::complete_submission`] exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct Submission {
    guess: String,
    word_index: usize,
    seq: u64,
    exact: bool,
}

impl Submission {
    /// The normalized guess.
    pub fn guess(&self) -> &str {
        &self.guess
    }

    /// Index of the word guessed at.
    pub fn word_index(&self) -> usize {
        self.word_index
    }

    /// `true` if the guess is the target word. Exact guesses need no
    /// validation.
    pub fn is_exact(&self) -> bool {
        self.exact
    }
}

/// One Word Link phase: a list of words guessed shortest first, with hearts,
/// score and hints.
///
/// The session never renders anything. It queues [`SessionEvent`]s for
/// whoever draws it and reports [`SessionEvent::HeartsExhausted`] once each
/// time hearts reach zero, at which point the caller should hand off to a
/// mini-game.
#[derive(Debug)]
pub struct PuzzleSession {
    words: Vec<String>,
    current_index: usize,
    tiles: Option<WordTiles>,
    score: u32,
    hearts: u32,
    settings: SessionSettings,
    rng: StdRng,
    pending: Option<u64>,
    next_seq: u64,
    exhaustion_reported: bool,
    events: Vec<SessionEvent>,
}

impl PuzzleSession {
    /// Starts a phase over `words` with full hearts and no score.
    ///
    /// Words are trimmed, lowercased and sorted by length, keeping input
    /// order among equal lengths.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::EmptyWordList`] if no non-blank word is given.
    #[instrument(skip(words, settings), fields(count = words.len()))]
    pub fn new(words: Vec<String>, settings: SessionSettings) -> Result<Self, PuzzleError> {
        let words = prepare_words(words)?;
        let hearts = *settings.starting_hearts();
        info!(words = ?words, hearts, "Starting Word Link phase");
        Ok(Self::start(words, 0, 0, hearts, settings))
    }

    /// Rebuilds a phase from a snapshot taken by [`PuzzleSession::snapshot`]
    /// and resolved by the resumption gateway. Pending bonus hearts are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::EmptyWordList`] if the snapshot carries no words.
    #[instrument(skip(snapshot, settings), fields(target = %snapshot.resume_target()))]
    pub fn resume(
        snapshot: &ResumptionSnapshot,
        settings: SessionSettings,
    ) -> Result<Self, PuzzleError> {
        let words = prepare_words(snapshot.words().clone())?;
        let index = (*snapshot.word_index()).min(words.len());
        let hearts = snapshot.total_hearts();
        info!(index, hearts, score = *snapshot.score(), "Resuming Word Link phase");
        Ok(Self::start(words, index, *snapshot.score(), hearts, settings))
    }

    fn start(
        words: Vec<String>,
        current_index: usize,
        score: u32,
        hearts: u32,
        settings: SessionSettings,
    ) -> Self {
        let rng = match settings.rng_seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            words,
            current_index,
            tiles: None,
            score,
            hearts,
            settings,
            rng,
            pending: None,
            next_seq: 0,
            exhaustion_reported: false,
            events: Vec::new(),
        };
        session.deal_current();
        session.note_exhaustion();
        session
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        if self.current_index >= self.words.len() {
            SessionPhase::AllWordsSolved
        } else if self.hearts == 0 {
            SessionPhase::Exhausted {
                word_index: self.current_index,
            }
        } else {
            SessionPhase::Guessing {
                word_index: self.current_index,
            }
        }
    }

    /// Words in play order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Index of the word being guessed.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The word being guessed, unless every word is solved.
    pub fn current_word(&self) -> Option<&str> {
        self.words.get(self.current_index).map(String::as_str)
    }

    /// Score so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Hearts left.
    pub fn hearts(&self) -> u32 {
        self.hearts
    }

    /// Rules this session plays by.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Letter boxes and pool of the current word.
    pub fn tiles(&self) -> Option<&WordTiles> {
        self.tiles.as_ref()
    }

    /// Hints spent on the current word.
    pub fn hints_used(&self) -> u32 {
        self.tiles.as_ref().map_or(0, WordTiles::hints_used)
    }

    /// Hints still available on the current word.
    pub fn hints_remaining(&self) -> u32 {
        self.settings
            .max_hints_per_word()
            .saturating_sub(self.hints_used())
    }

    /// `true` while a guess awaits its verdict.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Drains queued notifications.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Moves a pool tile into the first empty box.
    #[instrument(skip(self))]
    pub fn place_tile(&mut self, pool_index: usize) -> Result<usize, PuzzleError> {
        self.ensure_guessing()?;
        self.tiles
            .as_mut()
            .ok_or(PuzzleError::PhaseOver)?
            .place_tile(pool_index)
    }

    /// Moves a placed tile back to the pool.
    #[instrument(skip(self))]
    pub fn return_tile(&mut self, slot: usize) -> Result<char, PuzzleError> {
        self.ensure_guessing()?;
        self.tiles
            .as_mut()
            .ok_or(PuzzleError::PhaseOver)?
            .return_tile(slot)
    }

    /// The guess spelled by the letter boxes, once all are filled.
    pub fn assembled_guess(&self) -> Option<String> {
        self.tiles.as_ref().and_then(WordTiles::assembled)
    }

    /// Reveals a random hidden letter of the current word.
    ///
    /// Running out of hints, or having nothing left to reveal, is reported in
    /// the outcome rather than as an error. Placed tiles go back to the pool.
    #[instrument(skip(self), fields(word_index = self.current_index))]
    pub fn request_hint(&mut self) -> Result<HintOutcome, PuzzleError> {
        self.ensure_guessing()?;
        let max_hints = *self.settings.max_hints_per_word();
        let tiles = self.tiles.as_mut().ok_or(PuzzleError::PhaseOver)?;

        if tiles.hints_used() >= max_hints {
            debug!(max_hints, "No hints left for this word");
            return Ok(HintOutcome::NoHintsLeft);
        }

        let hidden = tiles.hidden_positions();
        if hidden.is_empty() {
            debug!("Every letter already revealed");
            return Ok(HintOutcome::AllRevealed);
        }

        let position = hidden[self.rng.gen_range(0..hidden.len())];
        let letter = tiles.reveal(position);
        self.events
            .push(SessionEvent::HintRevealed { position, letter });
        info!(position, %letter, "Hint given");
        Ok(HintOutcome::Revealed { position, letter })
    }

    /// Clears the guess and reshuffles the pool. Hinted letters stay.
    #[instrument(skip(self))]
    pub fn refresh(&mut self) -> Result<(), PuzzleError> {
        self.ensure_guessing()?;
        self.tiles
            .as_mut()
            .ok_or(PuzzleError::PhaseOver)?
            .reshuffle(&mut self.rng);
        self.events.push(SessionEvent::TilesRefreshed);
        Ok(())
    }

    /// Takes in a full guess and marks the session as submitting.
    ///
    /// # Errors
    ///
    /// - [`PuzzleError::SubmissionPending`] while another guess is in flight
    /// - [`PuzzleError::PhaseOver`] unless a word is being guessed
    /// - [`PuzzleError::GuessLengthMismatch`] if the guess does not fill the word
    #[instrument(skip(self))]
    pub fn begin_submission(&mut self, guess: &str) -> Result<Submission, PuzzleError> {
        self.ensure_guessing()?;
        let tiles = self.tiles.as_ref().ok_or(PuzzleError::PhaseOver)?;

        let guess = guess.trim().to_lowercase();
        let expected = tiles.len();
        let actual = guess.chars().count();
        if actual != expected {
            return Err(PuzzleError::GuessLengthMismatch { expected, actual });
        }

        let exact = guess == tiles.target();
        self.next_seq += 1;
        self.pending = Some(self.next_seq);
        debug!(exact, seq = self.next_seq, "Submission started");

        Ok(Submission {
            guess,
            word_index: self.current_index,
            seq: self.next_seq,
            exact,
        })
    }

    /// Applies the verdict for a submission. `is_valid_word` is ignored for
    /// exact matches.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::StaleSubmission`] if `submission` is not the one
    /// in flight.
    #[instrument(skip(self), fields(guess = %submission.guess))]
    pub fn complete_submission(
        &mut self,
        submission: Submission,
        is_valid_word: bool,
    ) -> Result<GuessOutcome, PuzzleError> {
        if self.pending != Some(submission.seq) || submission.word_index != self.current_index {
            warn!("Stale submission rejected");
            return Err(PuzzleError::StaleSubmission);
        }
        self.pending = None;

        if submission.exact {
            return Ok(self.solve_current(submission.guess));
        }

        if is_valid_word {
            let points = *self.settings.bonus_word_points();
            self.score = self.score.saturating_add(points);
            if let Some(tiles) = self.tiles.as_mut() {
                tiles.reshuffle(&mut self.rng);
            }
            info!(points, score = self.score, "Bonus word");
            self.events.push(SessionEvent::BonusWord {
                word: submission.guess,
                score: self.score,
            });
            return Ok(GuessOutcome::BonusWord { points });
        }

        self.hearts = self.hearts.saturating_sub(1);
        if let Some(tiles) = self.tiles.as_mut() {
            tiles.clear_guess();
        }
        info!(hearts = self.hearts, "Wrong guess, heart lost");
        self.events.push(SessionEvent::HeartLost {
            guess: submission.guess,
            hearts: self.hearts,
        });

        if self.hearts == 0 {
            self.note_exhaustion();
            Ok(GuessOutcome::OutOfHearts)
        } else {
            Ok(GuessOutcome::Wrong {
                hearts_left: self.hearts,
            })
        }
    }

    /// Drops a submission without applying it, clearing the submitting flag.
    #[instrument(skip(self))]
    pub fn abandon_submission(&mut self, submission: Submission) {
        if self.pending == Some(submission.seq) {
            debug!("Submission abandoned");
            self.pending = None;
        }
    }

    /// Clears the submitting flag without a [`Submission`] in hand.
    ///
    /// Returns `true` if a guess was in flight. Its token becomes stale.
    #[instrument(skip(self))]
    pub fn cancel_submission(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            debug!("Submission cancelled");
        }
        cancelled
    }

    /// Submits `guess`, consulting `validator` only when it is not the target.
    ///
    /// Dropping the returned future before it resolves (for example under
    /// `tokio::time::timeout`) leaves the session as if nothing was submitted.
    #[instrument(skip(self, validator))]
    pub async fn submit_guess(
        &mut self,
        guess: &str,
        validator: &WordValidator,
    ) -> Result<GuessOutcome, PuzzleError> {
        let submission = self.begin_submission(guess)?;
        let is_valid_word = if submission.is_exact() {
            true
        } else {
            let guard = PendingGuard::new(&mut self.pending, submission.seq);
            let verdict = validator.is_valid(submission.guess()).await;
            guard.disarm();
            verdict
        };
        self.complete_submission(submission, is_valid_word)
    }

    /// Submits the guess spelled by the letter boxes.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::GuessLengthMismatch`] while boxes are empty.
    #[instrument(skip(self, validator))]
    pub async fn submit_assembled(
        &mut self,
        validator: &WordValidator,
    ) -> Result<GuessOutcome, PuzzleError> {
        self.ensure_guessing()?;
        let tiles = self.tiles.as_ref().ok_or(PuzzleError::PhaseOver)?;
        let Some(guess) = tiles.assembled() else {
            let filled = tiles.slots().iter().filter(|s| s.is_some()).count();
            return Err(PuzzleError::GuessLengthMismatch {
                expected: tiles.len(),
                actual: filled,
            });
        };
        self.submit_guess(&guess, validator).await
    }

    /// Adds hearts, e.g. ones earned in a mini-game.
    #[instrument(skip(self))]
    pub fn add_hearts(&mut self, hearts: u32) {
        self.hearts = self.hearts.saturating_add(hearts);
        self.hearts_changed();
    }

    /// Sets the heart count outright.
    #[instrument(skip(self))]
    pub fn set_hearts(&mut self, hearts: u32) {
        self.hearts = hearts;
        self.hearts_changed();
    }

    /// Captures the state needed to resume this phase after a hand-off.
    #[instrument(skip(self))]
    pub fn snapshot(&self, target: ResumeTarget) -> ResumptionSnapshot {
        ResumptionSnapshot::new(self.hearts, self.score, target)
            .with_words(self.words.clone(), self.current_index)
    }

    /// Restarts the phase from the first word with full hearts and no score.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting Word Link phase");
        self.current_index = 0;
        self.score = 0;
        self.hearts = *self.settings.starting_hearts();
        self.pending = None;
        self.deal_current();
        self.note_exhaustion();
    }

    fn ensure_guessing(&self) -> Result<(), PuzzleError> {
        if self.pending.is_some() {
            return Err(PuzzleError::SubmissionPending);
        }
        match self.phase() {
            SessionPhase::Guessing { .. } => Ok(()),
            _ => Err(PuzzleError::PhaseOver),
        }
    }

    fn solve_current(&mut self, word: String) -> GuessOutcome {
        let points = *self.settings.exact_match_points();
        self.score = self.score.saturating_add(points);
        info!(word = %word, points, score = self.score, "Word solved");
        self.events.push(SessionEvent::WordSolved {
            word,
            word_index: self.current_index,
            score: self.score,
        });

        self.current_index += 1;
        self.deal_current();

        let phase_complete = self.tiles.is_none();
        if phase_complete {
            info!(score = self.score, "All words solved");
            self.events
                .push(SessionEvent::PhaseComplete { score: self.score });
        }
        GuessOutcome::Correct {
            points,
            phase_complete,
        }
    }

    fn deal_current(&mut self) {
        self.tiles = self
            .words
            .get(self.current_index)
            .map(|word| WordTiles::deal(word, &mut self.rng));
        if let Some(tiles) = &self.tiles {
            self.events.push(SessionEvent::WordStarted {
                word_index: self.current_index,
                length: tiles.len(),
            });
        }
    }

    fn hearts_changed(&mut self) {
        debug!(hearts = self.hearts, "Hearts adjusted");
        self.events
            .push(SessionEvent::HeartsChanged { hearts: self.hearts });
        self.note_exhaustion();
    }

    /// Reports exhaustion once per time hearts hit zero; re-arms when hearts
    /// come back.
    fn note_exhaustion(&mut self) {
        match self.phase() {
            SessionPhase::Exhausted { word_index } => {
                if !self.exhaustion_reported {
                    self.exhaustion_reported = true;
                    info!(word_index, score = self.score, "Hearts exhausted");
                    self.events.push(SessionEvent::HeartsExhausted {
                        word_index,
                        score: self.score,
                    });
                }
            }
            _ => self.exhaustion_reported = false,
        }
    }
}

/// Clears the submitting flag if validation never finishes.
struct PendingGuard<'a> {
    pending: &'a mut Option<u64>,
    seq: u64,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(pending: &'a mut Option<u64>, seq: u64) -> Self {
        Self {
            pending,
            seq,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed && *self.pending == Some(self.seq) {
            warn!(seq = self.seq, "Validation dropped before completing, clearing submission");
            *self.pending = None;
        }
    }
}

/// Trims, lowercases and drops blanks, then sorts shortest first (stable).
fn prepare_words(words: Vec<String>) -> Result<Vec<String>, PuzzleError> {
    let mut words: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return Err(PuzzleError::EmptyWordList);
    }
    words.sort_by_key(|w| w.chars().count());
    Ok(words)
}
