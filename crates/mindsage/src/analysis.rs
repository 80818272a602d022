use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mindsage_model::analysis::AnalysisResult;
use strum::Display;
use tracing::instrument;

use crate::auth::AuthToken;
use crate::client::base::JournalApi;
use crate::error::{Error, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Idle,
    Analyzing,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// The result became the current one.
    Applied(AnalysisResult),
    /// A newer analysis was issued while this one was in flight, its response was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct Slot {
    /// Sequence number of the most recently issued request.
    issued: u64,
    state: AnalysisState,
    current: Option<AnalysisResult>,
    last_known: Option<AnalysisResult>,
    last_error: Option<Error>,
}

/// An issued analysis. Dropping it before [`Pending::resolve`] puts the controller back into the
/// state it had before, unless a newer analysis was issued meanwhile.
struct Pending<'a> {
    slot: &'a Mutex<Slot>,
    sequence: u64,
    previous: Option<(AnalysisState, Option<AnalysisResult>)>,
}

impl Pending<'_> {
    fn resolve(&mut self) {
        self.previous = None;
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        let Some((state, current)) = self.previous.take() else {
            return;
        };
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.issued != self.sequence {
            return;
        }
        tracing::debug!(sequence = self.sequence, "Analysis cancelled");
        // An earlier analysis that was still running can no longer become current.
        slot.state = if state == AnalysisState::Analyzing {
            AnalysisState::Idle
        } else {
            state
        };
        slot.current = current;
    }
}

/// Runs analyses of draft text and holds the latest result.
///
/// Only the response of the most recently issued [`AnalysisController::analyze`] call can become
/// current, regardless of the order in which responses arrive.
pub struct AnalysisController<C> {
    client: Arc<C>,
    slot: Mutex<Slot>,
}

impl<C: JournalApi> AnalysisController<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            slot: Mutex::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Pending<'_> {
        let mut slot = self.lock();
        slot.issued += 1;
        let previous_state = std::mem::replace(&mut slot.state, AnalysisState::Analyzing);
        let previous_result = slot.current.take();
        Pending {
            slot: &self.slot,
            sequence: slot.issued,
            previous: Some((previous_state, previous_result)),
        }
    }

    #[instrument(skip_all, fields(sequence = tracing::field::Empty))]
    pub async fn analyze(&self, text: &str, token: Option<&AuthToken>) -> Result<AnalysisOutcome, Error> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        let mut pending = self.begin();
        let sequence = pending.sequence;
        tracing::Span::current().record("sequence", sequence);

        let response = self.client.analyze_text(text, token).await;

        pending.resolve();
        let mut slot = self.lock();
        if slot.issued != sequence {
            tracing::debug!(latest = slot.issued, "Discarding superseded analysis");
            return Ok(AnalysisOutcome::Superseded);
        }
        match response {
            Ok(result) => {
                if result.suicide_risk {
                    tracing::warn!("Analysis reported a safety risk");
                }
                slot.state = AnalysisState::Ready;
                slot.current = Some(result.clone());
                slot.last_known = Some(result.clone());
                slot.last_error = None;
                Ok(AnalysisOutcome::Applied(result))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Analysis failed");
                let err = Error::AnalysisFailed(err);
                slot.state = AnalysisState::Failed;
                slot.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// The result of the latest analysis, `None` while one is in flight or after it failed.
    #[must_use]
    pub fn current_result(&self) -> Option<AnalysisResult> {
        self.lock().current.clone()
    }

    /// The last successful result, kept for display while analyzing or after a failure.
    #[must_use]
    pub fn last_known_result(&self) -> Option<AnalysisResult> {
        self.lock().last_known.clone()
    }

    /// Whether the current result carries the service's safety flag. Never set by the client itself.
    #[must_use]
    pub fn risk_flag(&self) -> bool {
        self.lock().current.as_ref().is_some_and(|result| result.suicide_risk)
    }

    #[must_use]
    pub fn state(&self) -> AnalysisState {
        self.lock().state
    }

    #[must_use]
    pub fn last_error(&self) -> Option<Error> {
        self.lock().last_error.clone()
    }
}
