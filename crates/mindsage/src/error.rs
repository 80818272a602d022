use http::StatusCode;
use http::header::InvalidHeaderValue;
use serde::Deserialize;
use strum::Display;
use thiserror::Error;

/// Operations guarded against re-entrant calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Save,
    Fetch,
    MoodSubmit,
    MoodFetch,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An authentication token is required")]
    Unauthenticated,

    #[error("Another {0} is still in progress")]
    Busy(Operation),

    #[error("Loading failed: {0}")]
    LoadFailed(RequestError),

    #[error("Saving failed: {0}")]
    SaveFailed(RequestError),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(RequestError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Journal content must not be empty")]
    EmptyContent,

    #[error("Text to analyze must not be empty")]
    EmptyText,

    #[error("Owner id must not be empty")]
    EmptyOwner,

    #[error("Mood metric {field} must be between 0 and 100, got {value}")]
    MetricOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Outcome of a failed call to the journal service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Request failed ({status}): {reason}")]
    Status { status: StatusCode, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<url::ParseError> for TransportError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<http::Error> for TransportError {
    fn from(err: http::Error) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<InvalidHeaderValue> for TransportError {
    fn from(err: InvalidHeaderValue) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: String,
}

fn server_reason(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        return payload.error;
    }
    let body = body.trim();
    if body.is_empty() {
        status.canonical_reason().unwrap_or("unknown").to_owned()
    } else {
        body.to_owned()
    }
}

impl From<mindsage_http::Error> for RequestError {
    fn from(err: mindsage_http::Error) -> Self {
        match err {
            mindsage_http::Error::Status { status, body } => Self::Status {
                reason: server_reason(status, &body),
                status,
            },
            mindsage_http::Error::Timeout => TransportError::Timeout.into(),
            mindsage_http::Error::Unreachable(message) => TransportError::Unreachable(message).into(),
            mindsage_http::Error::Json(err) => TransportError::MalformedBody(err.to_string()).into(),
            mindsage_http::Error::Client(err) if err.is_decode() || err.is_body() => {
                TransportError::MalformedBody(err.to_string()).into()
            }
            mindsage_http::Error::Client(err) => TransportError::Unreachable(err.to_string()).into(),
            mindsage_http::Error::Http(err) => TransportError::from(err).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_error_payload() {
        let err = RequestError::from(mindsage_http::Error::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"error": "Missing user ID or journal content"}"#.to_owned(),
        });
        assert_eq!(
            err,
            RequestError::Status {
                status: StatusCode::BAD_REQUEST,
                reason: "Missing user ID or journal content".to_owned(),
            }
        );
    }

    #[test]
    fn status_falls_back_to_body_and_reason() {
        let err = RequestError::from(mindsage_http::Error::Status {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream down\n".to_owned(),
        });
        assert!(matches!(err, RequestError::Status { reason, .. } if reason == "upstream down"));

        let err = RequestError::from(mindsage_http::Error::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        });
        assert!(matches!(err, RequestError::Status { reason, .. } if reason == "Service Unavailable"));
    }

    #[test]
    fn transport_failures_are_classified() {
        assert_eq!(
            RequestError::from(mindsage_http::Error::Timeout),
            RequestError::Transport(TransportError::Timeout)
        );
        assert_eq!(
            RequestError::from(mindsage_http::Error::Unreachable("refused".to_owned())),
            RequestError::Transport(TransportError::Unreachable("refused".to_owned()))
        );
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            RequestError::from(mindsage_http::Error::Json(json_err)),
            RequestError::Transport(TransportError::MalformedBody(_))
        ));
    }

    #[test]
    fn busy_names_the_operation() {
        assert_eq!(
            Error::Busy(Operation::MoodSubmit).to_string(),
            "Another mood_submit is still in progress"
        );
    }
}
