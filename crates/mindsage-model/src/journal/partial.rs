use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analysis::Emotion;
use crate::journal::JournalEntry;

/// Body of `POST /add-journal`. The service names the owner field `id`.
#[derive(Debug, Serialize)]
pub struct NewJournalEntry<'a> {
    #[serde(rename = "id")]
    pub owner_id: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabaseResponse {
    #[serde(default)]
    pub data: Vec<JournalEntry>,
}

/// Acknowledgement without the stored row, e.g. `{"message": .., "dominant_emotion": ..}`.
#[derive(Debug, Default, Deserialize)]
pub struct JournalConfirmation {
    pub message: Option<String>,
    pub dominant_emotion: Option<Emotion>,
}

/// Response of `POST /add-journal`.
///
/// Depending on the deployment the created row is returned as is, nested under `entry`,
/// or as the first row of the storage response next to the analysis fields. Any other
/// object is a plain confirmation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreatedJournalEntry {
    Entry(JournalEntry),
    Nested { entry: JournalEntry },
    Stored { database_response: DatabaseResponse },
    Confirmation(JournalConfirmation),
}

impl CreatedJournalEntry {
    /// The stored entry, or one built from the submitted fields when the service only confirmed.
    #[must_use]
    pub fn into_entry(self, submitted: &NewJournalEntry<'_>) -> JournalEntry {
        let confirmation = match self {
            Self::Entry(entry) | Self::Nested { entry } => return entry,
            Self::Stored { database_response } => match database_response.data.into_iter().next() {
                Some(entry) => return entry,
                None => JournalConfirmation::default(),
            },
            Self::Confirmation(confirmation) => confirmation,
        };
        JournalEntry {
            id: None,
            owner_id: Some(submitted.owner_id.to_owned()),
            content: submitted.content.to_owned(),
            created_at: Utc::now().into(),
            dominant_emotion: confirmation.dominant_emotion,
        }
    }
}

/// Body of `GET /get-journals/{owner}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JournalList {
    Entries(Vec<JournalEntry>),
    Stored { data: Vec<JournalEntry> },
}

impl From<JournalList> for Vec<JournalEntry> {
    fn from(list: JournalList) -> Self {
        match list {
            JournalList::Entries(entries) | JournalList::Stored { data: entries } => entries,
        }
    }
}
