pub mod partial;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::analysis::Emotion;

/// Identifier assigned by the journal service. Depending on the backing store it is
/// either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    #[serde(rename = "user_id", alias = "owner_id", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub content: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_emotion: Option<Emotion>,
}

/// Accepts RFC 3339, Postgres style offsets like `+00` and timestamps without offset, read as UTC.
fn lenient_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error> {
    let raw = Cow::<str>::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(timestamp);
    }
    if let Ok(timestamp) = DateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(timestamp);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
        .map(|naive| naive.and_utc().into())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

impl JournalEntry {
    /// Fills the owner when the service left it out of the payload.
    #[must_use]
    pub fn with_default_owner(mut self, owner_id: &str) -> Self {
        if self.owner_id.is_none() {
            self.owner_id = Some(owner_id.to_owned());
        }
        self
    }
}
