use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Emotion label reported by the analysis service.
///
/// The set is open, labels the client does not know are kept verbatim in [`Emotion::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Surprise,
    Neutral,
    Stress,
    Overwhelmed,
    Love,
    Other(String),
}

impl Emotion {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Disgust => "disgust",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
            Self::Stress => "stress",
            Self::Overwhelmed => "overwhelmed",
            Self::Love => "love",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for Emotion {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "joy" => Self::Joy,
            "sadness" => Self::Sadness,
            "anger" => Self::Anger,
            "fear" => Self::Fear,
            "disgust" => Self::Disgust,
            "surprise" => Self::Surprise,
            "neutral" => Self::Neutral,
            "stress" => Self::Stress,
            "overwhelmed" => Self::Overwhelmed,
            "love" => Self::Love,
            _ => Self::Other(value.to_owned()),
        }
    }
}

impl From<String> for Emotion {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Emotion> for String {
    fn from(value: Emotion) -> Self {
        match value {
            Emotion::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub dominant_emotion: Emotion,
    pub activity_suggestion: String,
    /// `None` while the service has too little history to derive insights.
    #[serde(default)]
    pub insights: Option<String>,
    #[serde(rename = "emotions", default)]
    pub emotion_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub suicide_risk: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl AnalysisResult {
    #[must_use]
    pub fn score(&self, emotion: &Emotion) -> Option<f64> {
        self.emotion_scores.get(emotion.as_str()).copied()
    }
}
