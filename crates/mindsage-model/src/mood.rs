use serde::{Deserialize, Deserializer, Serialize};

pub const METRIC_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;
pub const MAX_ACTIVITY_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 500;

/// A single mood check-in. The four metrics are slider values in [`METRIC_RANGE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub happiness: f64,
    pub anxiety: f64,
    pub energy: f64,
    pub stress: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub activity: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for MoodEntry {
    fn default() -> Self {
        Self {
            id: None,
            happiness: 50.0,
            anxiety: 50.0,
            energy: 50.0,
            stress: 50.0,
            activity: String::new(),
            notes: String::new(),
        }
    }
}

impl MoodEntry {
    #[must_use]
    pub fn metrics(&self) -> [(&'static str, f64); 4] {
        [
            ("happiness", self.happiness),
            ("anxiety", self.anxiety),
            ("energy", self.energy),
            ("stress", self.stress),
        ]
    }
}

/// Confirmation of `POST /api/add-mood-entry`.
#[derive(Debug, Default, Deserialize)]
pub struct MoodConfirmation {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_new_entry_without_id() {
        let value = serde_json::to_value(MoodEntry {
            activity: "Running".to_owned(),
            ..MoodEntry::default()
        })
        .unwrap();
        assert_eq!(
            value,
            json!({
                "happiness": 50.0,
                "anxiety": 50.0,
                "energy": 50.0,
                "stress": 50.0,
                "activity": "Running",
                "notes": ""
            })
        );
    }

    #[test]
    fn deserialize_stored_entry() {
        let entry: MoodEntry = serde_json::from_value(json!({
            "id": 4,
            "happiness": 80,
            "anxiety": 10,
            "energy": 65.5,
            "stress": 20,
            "activity": null,
            "notes": "slept well"
        }))
        .unwrap();
        assert_eq!(entry.id, Some(4));
        assert_eq!(entry.activity, "");
        assert_eq!(entry.metrics()[2], ("energy", 65.5));
    }
}
