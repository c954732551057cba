//! Shared fixtures for engine and score sink tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use memory_game::{MemoryEngine, PersistenceError, RoundConfig, RoundState, ScoreRecord, ScoreSink};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Install a test-friendly subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("memory_game=debug"))
        .with_test_writer()
        .try_init();
}

/// Engine bound to the test's runtime.
pub fn engine() -> MemoryEngine {
    init_tracing();
    MemoryEngine::new(Handle::current())
}

/// Two pairs, tokens A and B, fixed shuffle.
pub fn two_pairs(seed: u64) -> RoundConfig {
    RoundConfig {
        seed: Some(seed),
        ..RoundConfig::with_tokens(2, ["A", "B"])
    }
}

/// Three pairs with short delays for real-time tests.
pub fn quick_round(seed: u64) -> RoundConfig {
    RoundConfig {
        seed: Some(seed),
        match_delay_ms: 10,
        mismatch_delay_ms: 20,
        ..RoundConfig::with_tokens(3, ["A", "B", "C"])
    }
}

/// Both deck positions holding `token`.
pub fn positions(state: &RoundState, token: &str) -> (usize, usize) {
    let found: Vec<usize> = state
        .cards
        .iter()
        .filter(|card| card.token == token)
        .map(|card| card.id)
        .collect();
    assert_eq!(found.len(), 2, "token {token} should appear twice");
    (found[0], found[1])
}

/// Longest a resolution can take for `config`, plus a margin.
pub fn settle_time(config: &RoundConfig) -> Duration {
    Duration::from_millis(config.match_delay_ms.max(config.mismatch_delay_ms) + 50)
}

/// Select both cards of `token` and wait for the match to resolve.
pub async fn match_pair(engine: &MemoryEngine, config: &RoundConfig, token: &str) {
    let (first, second) = positions(&engine.state(), token);
    engine.select(first);
    engine.select(second);
    tokio::time::sleep(settle_time(config)).await;
}

/// Match every pair in `tokens` order.
pub async fn play_to_completion(engine: &MemoryEngine, config: &RoundConfig, tokens: &[&str]) {
    for token in tokens {
        match_pair(engine, config, token).await;
    }
}

/// Collects completion callbacks.
#[derive(Clone, Default)]
pub struct Completions(Arc<Mutex<Vec<u32>>>);

impl Completions {
    pub fn attach(&self, engine: &MemoryEngine) {
        let scores = Arc::clone(&self.0);
        engine.on_complete(move |score| scores.lock().unwrap().push(score));
    }

    pub fn scores(&self) -> Vec<u32> {
        self.0.lock().unwrap().clone()
    }
}

/// Sink that forwards every record to a channel, optionally after a delay.
pub struct RecordingSink {
    tx: mpsc::UnboundedSender<ScoreRecord>,
    latency: Duration,
}

impl RecordingSink {
    pub fn new(latency: Duration) -> (Self, mpsc::UnboundedReceiver<ScoreRecord>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, latency }, rx)
    }
}

impl ScoreSink for RecordingSink {
    async fn persist_score(&self, record: ScoreRecord) -> Result<(), PersistenceError> {
        tokio::time::sleep(self.latency).await;
        self.tx
            .send(record)
            .map_err(|e| PersistenceError::Network(e.to_string()))
    }
}

/// Sink whose store is always unreachable.
#[derive(Default)]
pub struct FailingSink {
    pub calls: AtomicUsize,
}

impl FailingSink {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ScoreSink for FailingSink {
    async fn persist_score(&self, _record: ScoreRecord) -> Result<(), PersistenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(PersistenceError::Network("connection refused".to_string()))
    }
}
