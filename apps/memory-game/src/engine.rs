//! Engine facade: owns the round and drives its timed resolutions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use memory_core::{ConfigError, Deck, Round, RoundConfig, RoundState, SelectOutcome};
use tokio::runtime::Handle;

use crate::sink::{ScoreHandoff, ScoreSink};

type CompletionCallback = Arc<dyn Fn(u32) + Send + Sync>;

#[derive(Default)]
struct EngineState {
    round: Option<Round>,
    config: RoundConfig,
    /// Bumped by every `start`; resolutions from older rounds compare
    /// against it and drop themselves.
    generation: u64,
}

/// Inner state shared across clones.
struct EngineInner {
    runtime: Handle,
    state: Mutex<EngineState>,
    on_complete: Mutex<Option<CompletionCallback>>,
}

/// Stateful pair-matching engine.
///
/// Clones share the same round. Pair resolutions run as timer tasks on the
/// runtime passed to [`MemoryEngine::new`]; callers only ever `start`,
/// `select` and read `state`.
#[derive(Clone)]
pub struct MemoryEngine {
    inner: Arc<EngineInner>,
}

impl MemoryEngine {
    pub fn new(runtime: Handle) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                runtime,
                state: Mutex::new(EngineState::default()),
                on_complete: Mutex::new(None),
            }),
        }
    }

    /// Discard any current round and deal a new one.
    ///
    /// `None` uses the default configuration. An invalid configuration leaves
    /// the previous round in place.
    pub fn start(&self, config: Option<RoundConfig>) -> Result<RoundState, ConfigError> {
        let config = config.unwrap_or_default();
        config.validate()?;

        let round = Round::new(Deck::shuffled(&config)?, config.points_per_match);
        let snapshot = round.snapshot();

        let mut state = self.lock_state();
        state.generation = state.generation.wrapping_add(1);
        state.round = Some(round);
        state.config = config;

        tracing::info!(
            generation = state.generation,
            pairs = snapshot.pair_count,
            "round started"
        );
        Ok(snapshot)
    }

    /// Handle a tap on the card at `index`. Invalid taps are dropped.
    pub fn select(&self, index: usize) {
        let mut guard = self.lock_state();
        let state = &mut *guard;

        let Some(round) = state.round.as_mut() else {
            tracing::debug!(index, "selection before start ignored");
            return;
        };

        match round.select(index) {
            SelectOutcome::Ignored(reason) => {
                tracing::debug!(index, ?reason, "selection ignored");
            }
            SelectOutcome::FirstCard(_) => {}
            SelectOutcome::PairFormed(pair) => {
                let delay = state.config.resolution_delay(pair.is_match);
                tracing::debug!(
                    first = pair.first,
                    second = pair.second,
                    is_match = pair.is_match,
                    "pair formed"
                );
                self.schedule_resolution(state.generation, delay);
            }
        }
    }

    /// Snapshot of the current round, or the idle view before `start`.
    pub fn state(&self) -> RoundState {
        self.lock_state()
            .round
            .as_ref()
            .map(Round::snapshot)
            .unwrap_or_else(RoundState::idle)
    }

    /// Register the callback that receives each round's final score.
    pub fn on_complete<F>(&self, callback: F)
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        let mut slot = self
            .inner
            .on_complete
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            tracing::warn!("completion callback replaced");
        }
        *slot = Some(Arc::new(callback));
    }

    /// Persist every completed round's score through `handoff`.
    pub fn attach_score_sink<S: ScoreSink>(&self, handoff: ScoreHandoff<S>) {
        self.on_complete(move |final_score| {
            handoff.fire(final_score);
        });
    }

    /// Runtime handle resolutions are scheduled on.
    pub fn runtime(&self) -> &Handle {
        &self.inner.runtime
    }

    fn schedule_resolution(&self, generation: u64, delay: Duration) {
        let engine = self.clone();
        self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            engine.resolve_pending(generation);
        });
    }

    fn resolve_pending(&self, generation: u64) {
        let completed = {
            let mut state = self.lock_state();
            if state.generation != generation {
                tracing::debug!(
                    generation,
                    current = state.generation,
                    "stale resolution dropped"
                );
                return;
            }

            let Some(outcome) = state.round.as_mut().and_then(Round::resolve) else {
                return;
            };
            tracing::debug!(
                first = outcome.pair.first,
                second = outcome.pair.second,
                resolution = ?outcome.resolution,
                "pair resolved"
            );
            outcome.completed
        };

        if let Some(final_score) = completed {
            tracing::info!(generation, final_score, "round complete");
            let callback = self
                .inner
                .on_complete
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            if let Some(callback) = callback {
                callback(final_score);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
