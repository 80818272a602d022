use std::sync::{Arc, PoisonError, RwLock};

use mindsage_model::journal::JournalEntry;
use mindsage_model::journal::partial::NewJournalEntry;
use tracing::instrument;

use crate::auth::{AuthToken, require_token};
use crate::busy::BusyFlag;
use crate::client::base::JournalApi;
use crate::draft::Draft;
use crate::error::{Error, Operation, ValidationError};

/// Result of the most recent `fetch_all`, kept for the render surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(Error),
}

/// Owns the list of persisted journal entries of one user.
///
/// Saving and loading are independent: a save does not refresh the list, callers issue
/// [`EntryStore::fetch_all`] after [`EntryStore::save`] resolved when they need the server view.
pub struct EntryStore<C> {
    client: Arc<C>,
    entries: RwLock<Vec<JournalEntry>>,
    load_state: RwLock<LoadState>,
    saving: BusyFlag,
    loading: BusyFlag,
}

impl<C: JournalApi> EntryStore<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            entries: RwLock::default(),
            load_state: RwLock::default(),
            saving: BusyFlag::default(),
            loading: BusyFlag::default(),
        }
    }

    /// Entries in chronological order.
    #[must_use]
    pub fn entries(&self) -> Vec<JournalEntry> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load_state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    fn set_load_state(&self, state: LoadState) {
        *self.load_state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Replaces the local list with the entries stored for `owner_id`.
    ///
    /// On failure the previous list stays untouched and [`LoadState::Failed`] is recorded.
    #[instrument(skip(self, token))]
    pub async fn fetch_all(&self, owner_id: &str, token: Option<&AuthToken>) -> Result<Vec<JournalEntry>, Error> {
        if owner_id.trim().is_empty() {
            return Err(ValidationError::EmptyOwner.into());
        }
        let _guard = self.loading.try_acquire(Operation::Fetch)?;
        self.set_load_state(LoadState::Loading);

        match self.client.get_journals(owner_id, token).await {
            Ok(list) => {
                let entries: Vec<JournalEntry> = Vec::from(list)
                    .into_iter()
                    .map(|entry| entry.with_default_owner(owner_id))
                    .collect();
                tracing::debug!(count = entries.len(), "Loaded journal entries");
                *self.entries.write().unwrap_or_else(PoisonError::into_inner) = entries.clone();
                self.set_load_state(LoadState::Loaded);
                Ok(entries)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Loading journal entries failed");
                let err = Error::LoadFailed(err);
                self.set_load_state(LoadState::Failed(err.clone()));
                Err(err)
            }
        }
    }

    /// Persists the draft and appends the created entry.
    ///
    /// The draft is cleared only after the service confirmed the entry. When the service confirms
    /// without returning the stored row, the appended entry is built from the draft and has no id.
    #[instrument(skip(self, draft, token))]
    pub async fn save(
        &self,
        owner_id: &str,
        draft: &mut Draft,
        token: Option<&AuthToken>,
    ) -> Result<JournalEntry, Error> {
        if draft.is_blank() {
            return Err(ValidationError::EmptyContent.into());
        }
        if owner_id.trim().is_empty() {
            return Err(ValidationError::EmptyOwner.into());
        }
        let token = require_token(token)?;
        let _guard = self.saving.try_acquire(Operation::Save)?;

        let submitted = NewJournalEntry {
            owner_id,
            content: draft.as_str(),
        };
        let created = self
            .client
            .add_journal(&submitted, Some(token))
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Saving journal entry failed");
                Error::SaveFailed(err)
            })?;
        let entry = created.into_entry(&submitted).with_default_owner(owner_id);

        self.append(entry.clone());
        draft.clear();
        tracing::info!(id = ?entry.id, "Saved journal entry");
        Ok(entry)
    }

    fn append(&self, entry: JournalEntry) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entry.id.is_some() && entries.iter().any(|existing| existing.id == entry.id) {
            tracing::debug!(id = ?entry.id, "Entry already listed");
            return;
        }
        entries.push(entry);
    }
}
