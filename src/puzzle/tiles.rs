//! Letter boxes and tile pool for the word being guessed.

use super::error::PuzzleError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Letter boxes of one word plus the pool of tiles the player draws from.
///
/// Position 0 is always revealed. Every unrevealed position's letter is
/// either in the pool or placed in a box by the player, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordTiles {
    target: Vec<char>,
    revealed: Vec<bool>,
    placed: Vec<Option<char>>,
    pool: Vec<char>,
    hints_used: u32,
}

impl WordTiles {
    /// Reveals the first letter and shuffles the rest into the pool.
    #[instrument(skip(rng))]
    pub(crate) fn deal<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Self {
        let target: Vec<char> = word.chars().collect();
        let revealed: Vec<bool> = (0..target.len()).map(|i| i == 0).collect();
        let mut pool: Vec<char> = target.iter().skip(1).copied().collect();
        pool.shuffle(rng);
        debug!(pool_len = pool.len(), "Tiles dealt");
        Self {
            placed: vec![None; target.len()],
            target,
            revealed,
            pool,
            hints_used: 0,
        }
    }

    /// The word being guessed.
    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    /// Number of letter boxes.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Returns `true` for a zero-length word.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// What each box shows: revealed letters and player tiles.
    pub fn slots(&self) -> Vec<Option<char>> {
        self.target
            .iter()
            .zip(&self.revealed)
            .zip(&self.placed)
            .map(|((ch, revealed), placed)| if *revealed { Some(*ch) } else { *placed })
            .collect()
    }

    /// Tiles not yet placed, in draw order.
    pub fn pool(&self) -> &[char] {
        &self.pool
    }

    /// Hints spent on this word.
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// Positions showing their true letter.
    pub fn revealed_positions(&self) -> Vec<usize> {
        self.positions_where(|revealed| revealed)
    }

    /// The guess spelled by the boxes, once every box is filled.
    pub fn assembled(&self) -> Option<String> {
        self.slots().into_iter().collect()
    }

    pub(crate) fn hidden_positions(&self) -> Vec<usize> {
        self.positions_where(|revealed| !revealed)
    }

    /// Moves a pool tile into the first empty box. Returns that box's index.
    #[instrument(skip(self))]
    pub(crate) fn place_tile(&mut self, pool_index: usize) -> Result<usize, PuzzleError> {
        if pool_index >= self.pool.len() {
            return Err(PuzzleError::NoSuchTile(pool_index));
        }
        let slot = (0..self.len())
            .find(|&i| !self.revealed[i] && self.placed[i].is_none())
            .ok_or(PuzzleError::NoSuchTile(pool_index))?;
        let tile = self.pool.remove(pool_index);
        self.placed[slot] = Some(tile);
        debug!(slot, %tile, "Tile placed");
        Ok(slot)
    }

    /// Moves a placed tile back to the end of the pool.
    #[instrument(skip(self))]
    pub(crate) fn return_tile(&mut self, slot: usize) -> Result<char, PuzzleError> {
        let tile = self
            .placed
            .get_mut(slot)
            .and_then(Option::take)
            .ok_or(PuzzleError::NoSuchSlot(slot))?;
        self.pool.push(tile);
        Ok(tile)
    }

    /// Returns every placed tile to the pool.
    pub(crate) fn clear_guess(&mut self) {
        let returned: Vec<char> = self.placed.iter_mut().filter_map(Option::take).collect();
        self.pool.extend(returned);
    }

    /// Clears the guess and shuffles the pool. Revealed letters stay.
    #[instrument(skip(self, rng))]
    pub(crate) fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear_guess();
        self.pool.shuffle(rng);
    }

    /// Permanently reveals `position` and takes its tile out of the pool.
    #[instrument(skip(self))]
    pub(crate) fn reveal(&mut self, position: usize) -> char {
        self.clear_guess();
        let letter = self.target[position];
        self.revealed[position] = true;
        if let Some(i) = self.pool.iter().position(|c| *c == letter) {
            self.pool.remove(i);
        }
        self.hints_used += 1;
        debug!(position, %letter, "Letter revealed");
        letter
    }

    fn positions_where(&self, pred: impl Fn(bool) -> bool) -> Vec<usize> {
        self.revealed
            .iter()
            .enumerate()
            .filter(|(_, r)| pred(**r))
            .map(|(i, _)| i)
            .collect()
    }
}
