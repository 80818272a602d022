use crate::auth::AuthToken;
use crate::error::{RequestError, TransportError};
use async_trait::async_trait;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Uri};
use mindsage_http::{BaseHttpClient, DEFAULT_TIMEOUT, HttpRequest};
use mindsage_model::analysis::{AnalysisResult, AnalyzeRequest};
use mindsage_model::journal::partial::{CreatedJournalEntry, JournalList, NewJournalEntry};
use mindsage_model::mood::{MoodConfirmation, MoodEntry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: ApiUrl,
    /// Upper bound for a single request including reading the body.
    pub timeout: Duration,
}

impl Config {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url: ApiUrl::new(base_url),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiUrl {
    pub url: Url,
}

impl From<ApiUrl> for Url {
    fn from(api_url: ApiUrl) -> Self {
        api_url.url
    }
}

impl ApiUrl {
    /// Endpoints are resolved relative to the base, so it has to end with a slash.
    #[must_use]
    pub fn new(mut url: Url) -> Self {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Self { url }
    }

    pub fn add_journal(&self) -> Result<Url, TransportError> {
        self.url.join("add-journal").map_err(Into::into)
    }

    pub fn journals_for(&self, owner_id: &str) -> Result<Url, TransportError> {
        let mut url = self.url.join("get-journals/")?;
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidRequest(format!("{} cannot be a base url", self.url)))?
            .pop_if_empty()
            .push(owner_id);
        Ok(url)
    }

    pub fn analyze(&self) -> Result<Url, TransportError> {
        self.url.join("analyze").map_err(Into::into)
    }

    pub fn add_mood_entry(&self) -> Result<Url, TransportError> {
        self.url.join("api/add-mood-entry").map_err(Into::into)
    }

    pub fn mood_data(&self) -> Result<Url, TransportError> {
        self.url.join("api/get-mood-data").map_err(Into::into)
    }
}

fn build_request<B: Serialize + ?Sized>(
    method: Method,
    url: &Url,
    body: Option<&B>,
    token: Option<&AuthToken>,
) -> Result<HttpRequest, TransportError> {
    let uri = Uri::try_from(url.as_str()).map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
    let mut request_builder = http::request::Request::builder()
        .method(method)
        .uri(uri)
        .header(ACCEPT, "application/json");
    if let Some(token) = token.filter(|token| !token.is_empty()) {
        request_builder = request_builder.header(AUTHORIZATION, token.header_value()?);
    }
    let payload = match body {
        Some(body) => {
            request_builder = request_builder.header(CONTENT_TYPE, "application/json");
            serde_json::to_vec(body).map_err(|err| TransportError::InvalidRequest(err.to_string()))?
        }
        None => vec![],
    };
    request_builder.body(payload).map_err(Into::into)
}

/// Request plumbing shared by every client.
///
/// All failures leave this layer as a [`RequestError`], the transport error type never escapes.
#[async_trait]
pub trait BaseClient: Send + Sync {
    type Http: BaseHttpClient;

    fn get_http_client(&self) -> &Self::Http;
    fn get_config(&self) -> &Config;

    async fn api_send_request<T: DeserializeOwned + Send>(&self, request: HttpRequest) -> Result<T, RequestError> {
        tracing::debug!(method = ?request.method(), uri = ?request.uri(), "Sending API request");
        let response = self.get_http_client().request_json(request).await.map_err(|err| {
            tracing::debug!(error = %err, "API request failed");
            RequestError::from(err)
        })?;
        Ok(response.into_body())
    }

    async fn api_request<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        token: Option<&AuthToken>,
    ) -> Result<T, RequestError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync + ?Sized,
    {
        let request = build_request(method, &url, body, token)?;
        self.api_send_request(request).await
    }
}

/// Endpoints of the journal service.
#[async_trait]
pub trait JournalApi: BaseClient {
    async fn add_journal(
        &self,
        entry: &NewJournalEntry<'_>,
        token: Option<&AuthToken>,
    ) -> Result<CreatedJournalEntry, RequestError> {
        let url = self.get_config().base_url.add_journal()?;
        self.api_request(Method::POST, url, Some(entry), token).await
    }

    async fn get_journals(&self, owner_id: &str, token: Option<&AuthToken>) -> Result<JournalList, RequestError> {
        let url = self.get_config().base_url.journals_for(owner_id)?;
        self.api_request::<_, ()>(Method::GET, url, None, token).await
    }

    async fn analyze_text(&self, text: &str, token: Option<&AuthToken>) -> Result<AnalysisResult, RequestError> {
        let url = self.get_config().base_url.analyze()?;
        self.api_request(Method::POST, url, Some(&AnalyzeRequest { text }), token)
            .await
    }

    async fn add_mood_entry(
        &self,
        entry: &MoodEntry,
        token: Option<&AuthToken>,
    ) -> Result<MoodConfirmation, RequestError> {
        let url = self.get_config().base_url.add_mood_entry()?;
        self.api_request(Method::POST, url, Some(entry), token).await
    }

    async fn get_mood_data(&self, token: Option<&AuthToken>) -> Result<Vec<MoodEntry>, RequestError> {
        let url = self.get_config().base_url.mood_data()?;
        self.api_request::<_, ()>(Method::GET, url, None, token).await
    }
}

impl<T> JournalApi for T where T: BaseClient {}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_url(base: &str) -> ApiUrl {
        ApiUrl::new(Url::parse(base).unwrap())
    }

    #[test]
    fn endpoints_resolve_against_base() {
        let api = api_url("http://127.0.0.1:5000");
        assert_eq!(api.add_journal().unwrap().as_str(), "http://127.0.0.1:5000/add-journal");
        assert_eq!(api.analyze().unwrap().as_str(), "http://127.0.0.1:5000/analyze");
        assert_eq!(
            api.mood_data().unwrap().as_str(),
            "http://127.0.0.1:5000/api/get-mood-data"
        );

        let nested = api_url("https://example.org/mindsage");
        assert_eq!(
            nested.add_journal().unwrap().as_str(),
            "https://example.org/mindsage/add-journal"
        );
    }

    #[test]
    fn owner_id_is_escaped() {
        let api = api_url("http://127.0.0.1:5000/");
        assert_eq!(
            api.journals_for("user-123").unwrap().as_str(),
            "http://127.0.0.1:5000/get-journals/user-123"
        );
        assert_eq!(
            api.journals_for("a/b c").unwrap().as_str(),
            "http://127.0.0.1:5000/get-journals/a%2Fb%20c"
        );
    }

    #[test]
    fn request_carries_token_and_json() {
        let url = Url::parse("http://127.0.0.1:5000/analyze").unwrap();
        let token = AuthToken::new("abc");
        let request = build_request(Method::POST, &url, Some(&AnalyzeRequest { text: "hi" }), Some(&token)).unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.body().as_slice(), br#"{"text":"hi"}"#);
    }

    #[test]
    fn request_without_token_or_body() {
        let url = Url::parse("http://127.0.0.1:5000/get-journals/u").unwrap();
        let request = build_request::<()>(Method::GET, &url, None, None).unwrap();
        assert!(!request.headers().contains_key(AUTHORIZATION));
        assert!(!request.headers().contains_key(CONTENT_TYPE));
        assert!(request.body().is_empty());
    }
}
