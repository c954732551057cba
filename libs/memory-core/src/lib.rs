//! Core pair-matching ("memory") game model shared by the game runtime.
//!
//! Provides:
//! - Round configuration and card types
//! - Deck generation with an unbiased shuffle
//! - Selection tracking and round bookkeeping (moves, score, completion)

pub mod deck;
pub mod error;
pub mod round;
pub mod types;

pub use deck::{generate_deck, Deck};
pub use error::{ConfigError, Result};
pub use round::{IgnoreReason, PendingPair, Resolution, ResolveOutcome, Round, SelectOutcome};
pub use types::{Card, Phase, RoundConfig, RoundState, DEFAULT_TOKENS, MIN_PAIRS};
