//! Embeddable runtime for the pair-matching game.
//!
//! Wraps the synchronous model from `memory-core` with timed pair
//! resolution on Tokio, a completion callback, and best-effort score
//! persistence.

pub mod config;
pub mod engine;
pub mod error;
pub mod sink;

pub use config::SinkConfig;
pub use engine::MemoryEngine;
pub use error::PersistenceError;
pub use sink::{RestScoreSink, ScoreHandoff, ScoreRecord, ScoreSink};

pub use memory_core::{
    Card, ConfigError, IgnoreReason, Phase, RoundConfig, RoundState, DEFAULT_TOKENS,
};
