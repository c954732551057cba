//! Error types for memory-core.

use thiserror::Error;

/// Result type alias using ConfigError.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reasons a round configuration cannot produce a playable round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("pair count must be at least {minimum}, got {pair_count}")]
    TooFewPairs { pair_count: usize, minimum: usize },

    #[error("need {required} distinct tokens, only {available} supplied")]
    NotEnoughTokens { required: usize, available: usize },

    #[error("{field} must be greater than zero")]
    ZeroDelay { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_not_enough_tokens() {
        let error = ConfigError::NotEnoughTokens {
            required: 8,
            available: 3,
        };
        assert_eq!(error.to_string(), "need 8 distinct tokens, only 3 supplied");
    }

    #[test]
    fn display_zero_delay() {
        let error = ConfigError::ZeroDelay {
            field: "mismatch_delay_ms",
        };
        assert_eq!(error.to_string(), "mismatch_delay_ms must be greater than zero");
    }
}
