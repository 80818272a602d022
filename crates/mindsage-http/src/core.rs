use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::Error;

pub type HttpRequest = http::request::Request<Vec<u8>>;

pub type HttpResponse<T> = http::response::Response<T>;

/// Transport seam of the client.
///
/// Implementations return [`Error::Status`] for every non-2xx response so callers
/// only ever see successful bodies.
#[async_trait]
pub trait BaseHttpClient: Send + Sync {
    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Error>;

    async fn request_json<T: DeserializeOwned + Send>(&self, request: HttpRequest) -> Result<HttpResponse<T>, Error> {
        let (parts, text) = self.request_text(request).await?.into_parts();
        let body = serde_json::from_str(&text)?;
        Ok(HttpResponse::from_parts(parts, body))
    }
}
