//! Errors raised off the gameplay path.

use thiserror::Error;

/// Failure to store a finished round's score.
///
/// Only ever reported through logging; gameplay state never sees it.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
