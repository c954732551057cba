//! Selection tracking and round bookkeeping.
//!
//! `Round` is the synchronous half of the game: it decides which taps are
//! accepted, forms pairs, and applies a pair's outcome when asked to. When
//! that happens is up to the caller, which owns the clock.

use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::types::{Phase, RoundState};

/// Why a selection was dropped. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    RoundComplete,
    Locked,
    OutOfBounds,
    AlreadyMatched,
    AlreadyFaceUp,
    PairPending,
}

/// Two face-up cards waiting for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPair {
    pub first: usize,
    pub second: usize,
    pub is_match: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Ignored(IgnoreReason),
    FirstCard(usize),
    PairFormed(PendingPair),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Matched,
    Reverted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub pair: PendingPair,
    pub resolution: Resolution,
    /// Final score, set only on the resolution that completes the round.
    pub completed: Option<u32>,
}

/// State of one round from shuffle to completion.
///
/// Callers observe it through [`Round::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    deck: Deck,
    pending: Vec<usize>,
    moves: u32,
    matched_pairs: usize,
    score: u32,
    locked: bool,
    points_per_match: u32,
    completion_reported: bool,
}

impl Round {
    pub fn new(deck: Deck, points_per_match: u32) -> Self {
        Self {
            deck,
            pending: Vec::with_capacity(2),
            moves: 0,
            matched_pairs: 0,
            score: 0,
            locked: false,
            points_per_match,
            completion_reported: false,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.deck.pair_count()
    }

    pub fn phase(&self) -> Phase {
        if self.is_complete() {
            Phase::Complete
        } else if self.locked {
            Phase::Locked
        } else {
            Phase::Playing
        }
    }

    /// Flip the card at `index` if the round can take it.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if let Err(reason) = self.check_selectable(index) {
            return SelectOutcome::Ignored(reason);
        }

        self.deck.card_mut(index).face_up = true;
        self.pending.push(index);

        match *self.pending.as_slice() {
            [first, second] => {
                self.locked = true;
                self.moves = self.moves.saturating_add(1);
                SelectOutcome::PairFormed(PendingPair {
                    first,
                    second,
                    is_match: self.deck[first].token == self.deck[second].token,
                })
            }
            _ => SelectOutcome::FirstCard(index),
        }
    }

    /// Commit the pending pair, then unlock.
    ///
    /// Returns `None` when no pair is waiting.
    pub fn resolve(&mut self) -> Option<ResolveOutcome> {
        let [first, second] = *self.pending.as_slice() else {
            return None;
        };
        let is_match = self.deck[first].token == self.deck[second].token;

        let resolution = if is_match {
            for index in [first, second] {
                let card = self.deck.card_mut(index);
                card.face_up = true;
                card.matched = true;
            }
            self.matched_pairs += 1;
            self.score = self.score.saturating_add(self.points_per_match);
            Resolution::Matched
        } else {
            for index in [first, second] {
                self.deck.card_mut(index).face_up = false;
            }
            Resolution::Reverted
        };

        self.pending.clear();
        self.locked = false;

        Some(ResolveOutcome {
            pair: PendingPair {
                first,
                second,
                is_match,
            },
            resolution,
            completed: self.take_completion(),
        })
    }

    pub fn snapshot(&self) -> RoundState {
        RoundState {
            phase: self.phase(),
            cards: self.deck.cards().to_vec(),
            pending_selection: self.pending.clone(),
            moves: self.moves,
            matched_pairs: self.matched_pairs,
            pair_count: self.deck.pair_count(),
            score: self.score,
            is_locked: self.locked,
            is_complete: self.is_complete(),
        }
    }

    fn check_selectable(&self, index: usize) -> Result<(), IgnoreReason> {
        if self.is_complete() {
            return Err(IgnoreReason::RoundComplete);
        }
        if self.locked {
            return Err(IgnoreReason::Locked);
        }
        let card = self.deck.get(index).ok_or(IgnoreReason::OutOfBounds)?;
        if card.matched {
            return Err(IgnoreReason::AlreadyMatched);
        }
        if card.face_up {
            return Err(IgnoreReason::AlreadyFaceUp);
        }
        if self.pending.len() >= 2 {
            return Err(IgnoreReason::PairPending);
        }
        Ok(())
    }

    fn take_completion(&mut self) -> Option<u32> {
        if self.completion_reported || !self.is_complete() {
            return None;
        }
        self.completion_reported = true;
        Some(self.score)
    }
}
