use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Connection failed: {0}")]
    Unreachable(String),

    #[error("Response failed with status: {status}")]
    Status { status: StatusCode, body: String },

    #[error(transparent)]
    Http(#[from] http::Error),

    #[error("Invalid json body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation timed out")]
    Timeout,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unreachable(err.to_string())
        } else {
            Self::Client(err)
        }
    }
}
