//! Rule violations reported by a Word Link session.

/// Error returned when a session operation is not allowed right now.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum PuzzleError {
    /// A session needs at least one word.
    #[display("A Word Link phase needs at least one word")]
    EmptyWordList,

    /// A guess is still being validated.
    #[display("A guess is already being submitted")]
    SubmissionPending,

    /// The submission does not belong to the guess in flight.
    #[display("Submission is stale or was already completed")]
    StaleSubmission,

    /// The guess does not fill every letter box.
    #[display("Guess has {} letters, expected {}", actual, expected)]
    GuessLengthMismatch {
        /// Letters in the target word.
        expected: usize,
        /// Letters in the guess.
        actual: usize,
    },

    /// Hearts are exhausted or every word is solved.
    #[display("No word is being guessed")]
    PhaseOver,

    /// The tile pool has no tile at this index.
    #[display("No tile at pool index {}", _0)]
    NoSuchTile(usize),

    /// The slot is out of range, revealed, or empty.
    #[display("Slot {} holds no player tile", _0)]
    NoSuchSlot(usize),
}

impl std::error::Error for PuzzleError {}
