//! Score persistence for completed rounds.
//!
//! A finished round hands its score to a [`ScoreSink`] through a
//! [`ScoreHandoff`], which runs the write as a detached task. The round is
//! already complete when this happens, and nothing the sink does can change
//! that: failures are logged and dropped, never retried.

use std::future::Future;
use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::{SinkConfig, DEFAULT_GAME_NAME};
use crate::error::PersistenceError;

/// Row written for a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub child_id: Uuid,
    pub game_name: String,
    pub score: u32,
}

/// External store for finished scores.
pub trait ScoreSink: Send + Sync + 'static {
    fn persist_score(
        &self,
        record: ScoreRecord,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}

/// Fires one persistence call per completed round.
pub struct ScoreHandoff<S> {
    sink: Arc<S>,
    player: Option<Uuid>,
    game_name: String,
    runtime: Handle,
}

impl<S: ScoreSink> ScoreHandoff<S> {
    pub fn new(sink: Arc<S>, player: Option<Uuid>, runtime: Handle) -> Self {
        Self {
            sink,
            player,
            game_name: DEFAULT_GAME_NAME.to_string(),
            runtime,
        }
    }

    /// Handoff that records scores under `config.game_name`.
    pub fn from_config(
        sink: Arc<S>,
        config: &SinkConfig,
        player: Option<Uuid>,
        runtime: Handle,
    ) -> Self {
        Self::new(sink, player, runtime).with_game_name(config.game_name.clone())
    }

    pub fn with_game_name(mut self, game_name: impl Into<String>) -> Self {
        self.game_name = game_name.into();
        self
    }

    /// Start persisting `final_score` and return without waiting.
    ///
    /// Returns `None` when no player is attached, since there is no one to
    /// record the score for.
    pub fn fire(&self, final_score: u32) -> Option<JoinHandle<()>> {
        let Some(child_id) = self.player else {
            tracing::debug!(final_score, "no player attached, score not persisted");
            return None;
        };

        let record = ScoreRecord {
            child_id,
            game_name: self.game_name.clone(),
            score: final_score,
        };
        let sink = Arc::clone(&self.sink);

        Some(self.runtime.spawn(async move {
            match sink.persist_score(record).await {
                Ok(()) => tracing::info!(%child_id, final_score, "score saved"),
                Err(error) => {
                    tracing::error!(%child_id, final_score, %error, "failed to save score")
                }
            }
        }))
    }
}

/// Inserts scores through a PostgREST-style HTTP endpoint.
pub struct RestScoreSink {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestScoreSink {
    pub fn new(config: &SinkConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        }
    }

    /// Create a sink from environment variables, see [`SinkConfig::from_env`].
    pub fn from_env() -> Result<Self, PersistenceError> {
        Ok(Self::new(&SinkConfig::from_env()?))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ScoreSink for RestScoreSink {
    async fn persist_score(&self, record: ScoreRecord) -> Result<(), PersistenceError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await
            .map_err(|e| PersistenceError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(PersistenceError::Backend { status, message });
        }

        Ok(())
    }
}
