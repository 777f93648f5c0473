//! Prediction Controller - owns submission state and history.
//!
//! The controller is a cheap-to-clone handle. `submit` flips the state to
//! Pending and returns right away; a spawned task waits out the simulated
//! latency, scores the request, and applies the outcome.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, oneshot, RwLock};
use tracing::{debug, error, info, instrument, warn};
use wellsight_engine::{MockScorer, Scorer};
use wellsight_store::HistoryStore;
use wellsight_types::{PredictionDraft, PredictionId, PredictionRequest, PredictionResult};

use super::state::{HistorySummary, LifecycleSnapshot, LifecycleState, LifecycleStatus};
use crate::config::{LifecycleConfig, OverlapPolicy};
use crate::error::{LifecycleError, LifecycleResult};

/// Events emitted by the controller.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    /// A request was accepted and is now pending.
    Submitted { request: PredictionRequest },

    /// A request resolved with a result.
    Succeeded { result: PredictionResult },

    /// A submission failed validation or scoring.
    Failed { error: LifecycleError },

    /// A result could not be written to durable storage.
    PersistenceFailed { id: PredictionId, reason: String },

    /// `current` was cleared.
    Cleared,
}

/// Handle to a submission that has not resolved yet.
#[derive(Debug)]
pub struct PendingPrediction {
    outcome: oneshot::Receiver<LifecycleResult<PredictionResult>>,
}

impl PendingPrediction {
    /// Wait for the submission to resolve.
    ///
    /// The controller applies the outcome whether or not anyone waits.
    pub async fn wait(self) -> LifecycleResult<PredictionResult> {
        self.outcome.await.map_err(|_| LifecycleError::Abandoned)?
    }
}

struct Inner {
    config: LifecycleConfig,
    store: Arc<dyn HistoryStore>,
    scorer: Arc<dyn Scorer>,
    state: RwLock<LifecycleState>,
    in_flight: AtomicUsize,
    event_tx: broadcast::Sender<LifecycleEvent>,
}

/// Holds one slot of the in-flight count until released or dropped.
struct InFlightGuard {
    inner: Arc<Inner>,
    released: bool,
}

impl InFlightGuard {
    fn acquire(inner: &Arc<Inner>) -> Self {
        inner.in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            inner: Arc::clone(inner),
            released: false,
        }
    }

    /// Give the slot back, returning how many requests remain in flight.
    fn release(mut self) -> usize {
        self.released = true;
        self.inner.in_flight.fetch_sub(1, Ordering::SeqCst) - 1
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if !self.released {
            self.inner.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Request lifecycle controller.
#[derive(Clone)]
pub struct PredictionController {
    inner: Arc<Inner>,
}

impl PredictionController {
    /// Open a controller, loading history once from `store`.
    ///
    /// A store that cannot be read (missing, corrupt, or failing) yields an
    /// empty history; the error is logged and never returned.
    pub async fn open(
        config: LifecycleConfig,
        store: Arc<dyn HistoryStore>,
        scorer: Arc<dyn Scorer>,
    ) -> Self {
        let history = match store.load().await {
            Ok(history) => history,
            Err(e) => {
                warn!(
                    store = %store.describe(),
                    error = %e,
                    "could not load prediction history, starting empty"
                );
                Vec::new()
            }
        };

        info!(
            store = %store.describe(),
            scorer = scorer.name(),
            history = history.len(),
            "prediction controller ready"
        );

        if let Some(newest) = history.iter().map(|r| r.id).max() {
            PredictionId::observe(newest);
        }

        let (event_tx, _) = broadcast::channel(config.event_buffer.max(1));

        Self {
            inner: Arc::new(Inner {
                config,
                store,
                scorer,
                state: RwLock::new(LifecycleState::with_history(history)),
                in_flight: AtomicUsize::new(0),
                event_tx,
            }),
        }
    }

    /// Open a controller backed by the lookup-table engine.
    pub async fn with_mock_scorer(config: LifecycleConfig, store: Arc<dyn HistoryStore>) -> Self {
        Self::open(config, store, Arc::new(MockScorer::new())).await
    }

    /// Validate and submit a draft.
    ///
    /// Validation failures are returned immediately and leave the controller
    /// Failed with `last_error` set; `current` and `history` are untouched.
    /// Requests already in flight still resolve into history, but the status
    /// they settle on stays Failed until the next accepted submit.
    #[instrument(skip(self, draft))]
    pub async fn submit(&self, draft: PredictionDraft) -> LifecycleResult<PendingPrediction> {
        if self.rejects_overlap() {
            return Err(LifecycleError::Busy);
        }

        match draft.validate() {
            Ok(request) => self.submit_request(request).await,
            Err(e) => {
                let error = LifecycleError::Validation(e);
                warn!(error = %error, "prediction request rejected");
                self.inner.state.write().await.reject(error.clone());
                self.emit(LifecycleEvent::Failed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Submit an already-validated request.
    #[instrument(skip(self, request), fields(depth = request.depth()))]
    pub async fn submit_request(
        &self,
        request: PredictionRequest,
    ) -> LifecycleResult<PendingPrediction> {
        let guard = {
            let mut state = self.inner.state.write().await;
            if self.rejects_overlap() {
                return Err(LifecycleError::Busy);
            }
            state.begin();
            InFlightGuard::acquire(&self.inner)
        };

        info!(
            soil = %request.soil_type(),
            rock = %request.rock_type(),
            depth = request.depth(),
            "prediction submitted"
        );
        self.emit(LifecycleEvent::Submitted {
            request: request.clone(),
        });

        let (tx, rx) = oneshot::channel();
        let controller = self.clone();

        tokio::spawn(async move {
            let latency = controller.inner.config.simulated_latency();
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let outcome = controller.resolve(request, guard).await;
            let _ = tx.send(outcome);
        });

        Ok(PendingPrediction { outcome: rx })
    }

    async fn resolve(
        &self,
        request: PredictionRequest,
        guard: InFlightGuard,
    ) -> LifecycleResult<PredictionResult> {
        let scorer = Arc::clone(&self.inner.scorer);
        let scored = match catch_unwind(AssertUnwindSafe(|| scorer.score(&request))) {
            Ok(scored) => scored.map_err(LifecycleError::Engine),
            Err(_) => {
                error!(scorer = scorer.name(), "scorer panicked");
                Err(LifecycleError::Abandoned)
            }
        };

        let mut state = self.inner.state.write().await;
        // Released under the lock so exactly one resolution sees zero remaining.
        let others_pending = guard.release() > 0;

        match scored {
            Ok(result) => {
                state.succeed(result.clone(), others_pending);
                info!(
                    id = %result.id,
                    confidence = result.confidence,
                    history = state.history.len(),
                    "prediction succeeded"
                );

                // Persist under the state lock so durable order matches history order.
                if let Err(e) = self.inner.store.append(result.clone()).await {
                    error!(
                        id = %result.id,
                        store = %self.inner.store.describe(),
                        error = %e,
                        "failed to persist prediction history"
                    );
                    self.emit(LifecycleEvent::PersistenceFailed {
                        id: result.id,
                        reason: e.to_string(),
                    });
                }
                drop(state);

                self.emit(LifecycleEvent::Succeeded {
                    result: result.clone(),
                });
                Ok(result)
            }
            Err(error) => {
                warn!(error = %error, "prediction failed");
                state.fail(error.clone(), others_pending);
                drop(state);

                self.emit(LifecycleEvent::Failed {
                    error: error.clone(),
                });
                Err(error)
            }
        }
    }

    /// Drop `current` after a resolution. History and status are unchanged.
    ///
    /// Returns `false` when there was nothing to clear or a request is
    /// still pending.
    pub async fn clear(&self) -> bool {
        let cleared = self.inner.state.write().await.clear();
        if cleared {
            debug!("current prediction cleared");
            self.emit(LifecycleEvent::Cleared);
        }
        cleared
    }

    pub async fn snapshot(&self) -> LifecycleSnapshot {
        self.inner.state.read().await.snapshot()
    }

    pub async fn status(&self) -> LifecycleStatus {
        self.inner.state.read().await.status
    }

    pub async fn current(&self) -> Option<PredictionResult> {
        self.inner.state.read().await.current.clone()
    }

    pub async fn history(&self) -> Vec<PredictionResult> {
        self.inner.state.read().await.history.clone()
    }

    pub async fn summary(&self) -> HistorySummary {
        HistorySummary::from_history(&self.inner.state.read().await.history)
    }

    /// Number of submissions that have not resolved yet.
    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.inner.event_tx.subscribe()
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.inner.config
    }

    fn rejects_overlap(&self) -> bool {
        self.inner.config.overlap == OverlapPolicy::Reject && self.in_flight() > 0
    }

    fn emit(&self, event: LifecycleEvent) {
        // No subscribers is fine.
        let _ = self.inner.event_tx.send(event);
    }
}
