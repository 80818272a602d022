use mindsage_model::analysis::{AnalysisResult, Emotion};
use mindsage_model::journal::JournalEntry;

use crate::analysis::{AnalysisController, AnalysisState};
use crate::client::base::JournalApi;
use crate::error::Error;
use crate::store::{EntryStore, LoadState};

pub const RISK_ALERT: &str =
    "Urgent: please seek support now. If you are in danger, contact your local emergency number or a crisis line.";
pub const NEEDS_MORE_HISTORY: &str = "Keep journaling, insights need a little more history.";

/// What the render surface shows, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    RiskAlert(&'static str),
    Error(Error),
    Analyzing,
    Analysis {
        dominant_emotion: Emotion,
        activity_suggestion: String,
        insights: String,
        /// The shown result belongs to an earlier analysis.
        stale: bool,
    },
    Loading,
    Entries(Vec<JournalEntry>),
}

/// Snapshot of the journal workflow for a render surface.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalView {
    pub risk_alert: bool,
    pub analysis_state: AnalysisState,
    pub current: Option<AnalysisResult>,
    pub last_known: Option<AnalysisResult>,
    pub load_state: LoadState,
    pub entries: Vec<JournalEntry>,
    pub errors: Vec<Error>,
}

impl JournalView {
    #[must_use]
    pub fn capture<C: JournalApi>(store: &EntryStore<C>, analysis: &AnalysisController<C>) -> Self {
        let load_state = store.load_state();
        let mut errors = vec![];
        if let LoadState::Failed(err) = &load_state {
            errors.push(err.clone());
        }
        if analysis.state() == AnalysisState::Failed
            && let Some(err) = analysis.last_error()
        {
            errors.push(err);
        }
        Self {
            risk_alert: analysis.risk_flag(),
            analysis_state: analysis.state(),
            current: analysis.current_result(),
            last_known: analysis.last_known_result(),
            load_state,
            entries: store.entries(),
            errors,
        }
    }

    /// Adds an outcome the caller received directly, e.g. a failed save.
    pub fn push_error(&mut self, err: Error) {
        self.errors.push(err);
    }

    /// Panels ordered by priority. A risk alert always comes first.
    #[must_use]
    pub fn panels(&self) -> Vec<Panel> {
        let mut panels = vec![];
        if self.risk_alert {
            panels.push(Panel::RiskAlert(RISK_ALERT));
        }
        panels.extend(self.errors.iter().cloned().map(Panel::Error));

        if self.analysis_state == AnalysisState::Analyzing {
            panels.push(Panel::Analyzing);
        }
        let (shown, stale) = match (&self.current, &self.last_known) {
            (Some(current), _) => (Some(current), false),
            (None, Some(last_known)) => (Some(last_known), true),
            (None, None) => (None, false),
        };
        if let Some(result) = shown {
            panels.push(Panel::Analysis {
                dominant_emotion: result.dominant_emotion.clone(),
                activity_suggestion: result.activity_suggestion.clone(),
                insights: result
                    .insights
                    .clone()
                    .unwrap_or_else(|| NEEDS_MORE_HISTORY.to_owned()),
                stale,
            });
        }

        if self.load_state == LoadState::Loading {
            panels.push(Panel::Loading);
        }
        panels.push(Panel::Entries(self.entries.clone()));
        panels
    }
}

/// Receives snapshots of the workflow, implemented by the user interface.
pub trait RenderSurface {
    fn render(&mut self, view: &JournalView);
}
