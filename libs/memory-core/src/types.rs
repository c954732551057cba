//! Core types for the pair-matching game.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Smallest board that still needs a choice between pairs.
pub const MIN_PAIRS: usize = 2;

/// Token set used when the embedding app does not supply its own.
pub const DEFAULT_TOKENS: [&str; 8] = ["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼"];

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Position in the deck, fixed for the round.
    pub id: usize,
    /// Opaque face value shared by exactly two cards.
    pub token: String,
    pub face_up: bool,
    pub matched: bool,
}

impl Card {
    pub fn new(id: usize, token: String) -> Self {
        Self {
            id,
            token,
            face_up: false,
            matched: false,
        }
    }
}

/// Options recognized by `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub pair_count: usize,
    pub tokens: Vec<String>,
    pub match_delay_ms: u64,
    pub mismatch_delay_ms: u64,
    pub points_per_match: u32,
    /// Fixed shuffle seed; `None` draws from the thread RNG.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            pair_count: DEFAULT_TOKENS.len(),
            tokens: DEFAULT_TOKENS.iter().map(|t| t.to_string()).collect(),
            match_delay_ms: 500,
            mismatch_delay_ms: 1000,
            points_per_match: 100,
            seed: None,
        }
    }
}

impl RoundConfig {
    /// Config for `pair_count` pairs drawn from `tokens`, other options default.
    pub fn with_tokens<I, S>(pair_count: usize, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pair_count,
            tokens: tokens.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Check every constraint a round depends on.
    pub fn validate(&self) -> Result<()> {
        if self.pair_count < MIN_PAIRS {
            return Err(ConfigError::TooFewPairs {
                pair_count: self.pair_count,
                minimum: MIN_PAIRS,
            });
        }
        if self.match_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "match_delay_ms",
            });
        }
        if self.mismatch_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "mismatch_delay_ms",
            });
        }

        let available = self.tokens.iter().collect::<HashSet<_>>().len();
        if available < self.pair_count {
            return Err(ConfigError::NotEnoughTokens {
                required: self.pair_count,
                available,
            });
        }
        Ok(())
    }

    /// How long a formed pair stays visible before it resolves.
    pub fn resolution_delay(&self, is_match: bool) -> Duration {
        if is_match {
            Duration::from_millis(self.match_delay_ms)
        } else {
            Duration::from_millis(self.mismatch_delay_ms)
        }
    }
}

/// Where a round is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Playing,
    Locked,
    Complete,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Read-only view of a round handed to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: Phase,
    pub cards: Vec<Card>,
    pub pending_selection: Vec<usize>,
    pub moves: u32,
    pub matched_pairs: usize,
    pub pair_count: usize,
    pub score: u32,
    pub is_locked: bool,
    pub is_complete: bool,
}

impl RoundState {
    /// View before any round has started.
    pub fn idle() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RoundConfig::default();
        assert_eq!(config.pair_count, 8);
        assert_eq!(config.match_delay_ms, 500);
        assert_eq!(config.mismatch_delay_ms, 1000);
        assert_eq!(config.points_per_match, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reject_single_pair() {
        let config = RoundConfig::with_tokens(1, ["A"]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooFewPairs {
                pair_count: 1,
                minimum: MIN_PAIRS
            })
        );
    }

    #[test]
    fn duplicate_tokens_do_not_count_twice() {
        let config = RoundConfig::with_tokens(3, ["A", "B", "A", "B"]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotEnoughTokens {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn reject_zero_mismatch_delay() {
        let config = RoundConfig {
            mismatch_delay_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDelay {
                field: "mismatch_delay_ms"
            })
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: RoundConfig =
            serde_json::from_str(r#"{"pair_count": 2, "tokens": ["A", "B"]}"#).unwrap();
        assert_eq!(config.pair_count, 2);
        assert_eq!(config.match_delay_ms, 500);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn resolution_delay_depends_on_outcome() {
        let config = RoundConfig::default();
        assert_eq!(config.resolution_delay(true), Duration::from_millis(500));
        assert_eq!(config.resolution_delay(false), Duration::from_millis(1000));
    }
}
