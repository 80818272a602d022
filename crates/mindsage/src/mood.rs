use std::sync::{Arc, PoisonError, RwLock};

use mindsage_model::mood::{MAX_ACTIVITY_LEN, MAX_NOTES_LEN, METRIC_RANGE, MoodEntry};

use crate::auth::{AuthToken, require_token};
use crate::busy::BusyFlag;
use crate::client::base::JournalApi;
use crate::error::{Error, Operation, ValidationError};

fn validate(entry: &MoodEntry) -> Result<(), ValidationError> {
    for (field, value) in entry.metrics() {
        if !METRIC_RANGE.contains(&value) {
            return Err(ValidationError::MetricOutOfRange { field, value });
        }
    }
    if entry.activity.chars().count() > MAX_ACTIVITY_LEN {
        return Err(ValidationError::TooLong {
            field: "activity",
            max: MAX_ACTIVITY_LEN,
        });
    }
    if entry.notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes",
            max: MAX_NOTES_LEN,
        });
    }
    Ok(())
}

/// Submits mood check-ins and keeps the list of recorded ones.
pub struct MoodTracker<C> {
    client: Arc<C>,
    entries: RwLock<Vec<MoodEntry>>,
    submitting: BusyFlag,
    loading: BusyFlag,
}

impl<C: JournalApi> MoodTracker<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            entries: RwLock::default(),
            submitting: BusyFlag::default(),
            loading: BusyFlag::default(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> Vec<MoodEntry> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub async fn submit(&self, entry: &MoodEntry, token: Option<&AuthToken>) -> Result<(), Error> {
        validate(entry)?;
        let token = require_token(token)?;
        let _guard = self.submitting.try_acquire(Operation::MoodSubmit)?;

        let confirmation = self
            .client
            .add_mood_entry(entry, Some(token))
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Saving mood entry failed");
                Error::SaveFailed(err)
            })?;
        tracing::info!(message = ?confirmation.message, "Saved mood entry");
        Ok(())
    }

    pub async fn fetch_all(&self, token: Option<&AuthToken>) -> Result<Vec<MoodEntry>, Error> {
        let _guard = self.loading.try_acquire(Operation::MoodFetch)?;
        let entries = self.client.get_mood_data(token).await.map_err(|err| {
            tracing::warn!(error = %err, "Loading mood entries failed");
            Error::LoadFailed(err)
        })?;
        tracing::debug!(count = entries.len(), "Loaded mood entries");
        *self.entries.write().unwrap_or_else(PoisonError::into_inner) = entries.clone();
        Ok(entries)
    }
}
