//! Environment configuration for score persistence.

use crate::error::PersistenceError;

pub const DEFAULT_TABLE: &str = "game_scores";
pub const DEFAULT_GAME_NAME: &str = "Memory Match";

/// Where and how finished scores are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub game_name: String,
}

impl SinkConfig {
    /// Load from environment variables (and `.env` if present).
    ///
    /// Required env vars:
    /// - SCORE_API_URL: Base URL of the REST store
    /// - SCORE_API_KEY: Key sent as `apikey` and bearer token
    ///
    /// Optional:
    /// - SCORE_TABLE: Table to insert into (default `game_scores`)
    /// - SCORE_GAME_NAME: Name recorded with each score (default `Memory Match`)
    pub fn from_env() -> Result<Self, PersistenceError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, PersistenceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SCORE_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PersistenceError::Config("SCORE_API_URL not set".to_string()))?;

        let api_key = lookup("SCORE_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PersistenceError::Config("SCORE_API_KEY not set".to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            table: optional(&lookup, "SCORE_TABLE", DEFAULT_TABLE),
            game_name: optional(&lookup, "SCORE_GAME_NAME", DEFAULT_GAME_NAME),
        })
    }

    /// Insert endpoint for the configured table.
    ///
    /// Format: `{base_url}/rest/v1/{table}`
    pub fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

/// Blank values fall back to `default`, like unset ones.
fn optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
