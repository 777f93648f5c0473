use crate::error::LifecycleError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use wellsight_types::{PredictionResult, Recommendation};

/// Where the controller is in the submit/resolve cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Mutable controller state. Only the controller touches this.
#[derive(Debug, Default)]
pub(crate) struct LifecycleState {
    pub(crate) status: LifecycleStatus,
    pub(crate) current: Option<PredictionResult>,
    pub(crate) history: Vec<PredictionResult>,
    pub(crate) last_error: Option<LifecycleError>,
}

impl LifecycleState {
    pub(crate) fn with_history(history: Vec<PredictionResult>) -> Self {
        Self {
            history,
            ..Default::default()
        }
    }

    pub(crate) fn begin(&mut self) {
        self.status = LifecycleStatus::Pending;
        self.last_error = None;
    }

    /// Record a result. With `others_pending` the status is left alone.
    ///
    /// The last resolution settles on Failed if a failure was recorded since
    /// the most recent submit, otherwise on Succeeded.
    pub(crate) fn succeed(&mut self, result: PredictionResult, others_pending: bool) {
        self.history.push(result.clone());
        self.current = Some(result);
        if !others_pending {
            self.status = if self.last_error.is_some() {
                LifecycleStatus::Failed
            } else {
                LifecycleStatus::Succeeded
            };
        }
    }

    /// Record a failed resolution. With `others_pending` the status stays
    /// Pending but the error is kept for the final settle.
    pub(crate) fn fail(&mut self, error: LifecycleError, others_pending: bool) {
        self.last_error = Some(error);
        if !others_pending {
            self.status = LifecycleStatus::Failed;
        }
    }

    /// Record a submission refused before it was accepted.
    pub(crate) fn reject(&mut self, error: LifecycleError) {
        self.status = LifecycleStatus::Failed;
        self.last_error = Some(error);
    }

    pub(crate) fn clear(&mut self) -> bool {
        let clearable = matches!(
            self.status,
            LifecycleStatus::Succeeded | LifecycleStatus::Failed
        );
        clearable && self.current.take().is_some()
    }

    pub(crate) fn snapshot(&self) -> LifecycleSnapshot {
        LifecycleSnapshot {
            status: self.status,
            current: self.current.clone(),
            history: self.history.clone(),
            last_error: self.last_error.clone(),
        }
    }
}

/// Read-only copy of the controller state.
///
/// `current`, when present, is the last element of `history`.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleSnapshot {
    pub status: LifecycleStatus,
    pub current: Option<PredictionResult>,
    pub history: Vec<PredictionResult>,
    /// Most recent failure since the last accepted submit. When requests are
    /// still in flight it may be set while `status` is Pending.
    pub last_error: Option<LifecycleError>,
}

impl LifecycleSnapshot {
    pub fn is_pending(&self) -> bool {
        self.status == LifecycleStatus::Pending
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary::from_history(&self.history)
    }
}

/// Dashboard figures over the prediction history.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total: usize,
    pub average_confidence: Option<f64>,
    pub best_confidence: Option<u8>,
    pub excellent_sites: usize,
    pub last_prediction_at: Option<DateTime<Utc>>,
}

impl HistorySummary {
    pub fn from_history(history: &[PredictionResult]) -> Self {
        if history.is_empty() {
            return Self::default();
        }

        let total = history.len();
        let sum: u32 = history.iter().map(|r| u32::from(r.confidence)).sum();

        Self {
            total,
            average_confidence: Some(f64::from(sum) / total as f64),
            best_confidence: history.iter().map(|r| r.confidence).max(),
            excellent_sites: history
                .iter()
                .filter(|r| r.recommendation == Recommendation::Excellent)
                .count(),
            last_prediction_at: history.iter().map(|r| r.timestamp).max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellsight_types::{PredictionDraft, ValidationError};

    fn sample(soil: &str, depth: i64) -> PredictionResult {
        let request = PredictionDraft::new()
            .soil(soil)
            .rock("sedimentary")
            .depth(depth)
            .coordinates(0.0, 0.0)
            .validate()
            .unwrap();
        wellsight_engine::score(&request)
    }

    #[test]
    fn default_state_is_idle_and_empty() {
        let state = LifecycleState::default();
        assert_eq!(state.status, LifecycleStatus::Idle);
        assert!(state.current.is_none());
        assert!(state.history.is_empty());
    }

    #[test]
    fn begin_clears_error_but_keeps_current() {
        let mut state = LifecycleState::default();
        state.succeed(sample("clay", 60), false);
        state.fail(
            LifecycleError::Validation(ValidationError::MissingField("depth")),
            false,
        );

        state.begin();
        assert_eq!(state.status, LifecycleStatus::Pending);
        assert!(state.last_error.is_none());
        assert!(state.current.is_some());
    }

    #[test]
    fn success_appends_and_sets_current() {
        let mut state = LifecycleState::with_history(vec![sample("sandy", 20)]);
        let result = sample("clay", 60);
        state.succeed(result.clone(), false);

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history.last(), Some(&result));
        assert_eq!(state.current, Some(result));
    }

    #[test]
    fn clear_only_applies_after_resolution() {
        let mut state = LifecycleState::default();
        state.succeed(sample("clay", 60), false);
        state.begin();
        assert!(!state.clear());
        assert!(state.current.is_some());

        state.succeed(sample("loamy", 45), false);
        assert!(state.clear());
        assert!(state.current.is_none());
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.status, LifecycleStatus::Succeeded);
        assert!(!state.clear());
    }

    #[test]
    fn resolution_with_others_pending_keeps_pending() {
        let mut state = LifecycleState::default();
        state.begin();
        state.succeed(sample("clay", 60), true);
        assert_eq!(state.status, LifecycleStatus::Pending);
        assert_eq!(state.history.len(), 1);

        state.succeed(sample("loamy", 45), false);
        assert_eq!(state.status, LifecycleStatus::Succeeded);
    }

    #[test]
    fn failure_while_others_pending_settles_failed() {
        let mut state = LifecycleState::default();
        state.begin();
        state.fail(LifecycleError::Abandoned, true);
        assert_eq!(state.status, LifecycleStatus::Pending);
        assert_eq!(state.last_error, Some(LifecycleError::Abandoned));

        state.succeed(sample("clay", 60), false);
        assert_eq!(state.status, LifecycleStatus::Failed);
        assert_eq!(state.history.len(), 1);
        assert!(state.current.is_some());

        state.begin();
        assert!(state.last_error.is_none());
    }

    #[test]
    fn rejected_submission_is_failed_even_while_pending() {
        let mut state = LifecycleState::default();
        state.begin();
        let error = LifecycleError::Validation(ValidationError::MissingField("soil type"));
        state.reject(error.clone());
        assert_eq!(state.status, LifecycleStatus::Failed);

        state.succeed(sample("clay", 60), false);
        assert_eq!(state.status, LifecycleStatus::Failed);
        assert_eq!(state.last_error, Some(error));
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn summary_over_history() {
        let history = vec![sample("clay", 60), sample("rocky", 20)];
        let summary = HistorySummary::from_history(&history);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.best_confidence, Some(83));
        assert_eq!(summary.excellent_sites, 1);
        // (83 + 53) / 2
        assert_eq!(summary.average_confidence, Some(68.0));
        assert!(summary.last_prediction_at.is_some());

        assert_eq!(HistorySummary::from_history(&[]), HistorySummary::default());
    }
}
