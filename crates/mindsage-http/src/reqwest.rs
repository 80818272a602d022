use async_trait::async_trait;
use std::time::Duration;

use crate::core::{BaseHttpClient, HttpRequest, HttpResponse};
use crate::error::Error;
use reqwest::Request;
use tokio::time::timeout;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()?;

        Ok(Self { client, timeout })
    }

    fn build_request(&self, request: HttpRequest) -> Result<Request, Error> {
        let (parts, body) = request.into_parts();
        let mut request_builder = self.client.request(parts.method, parts.uri.to_string());
        for (name, value) in &parts.headers {
            request_builder = request_builder.header(name.as_str(), value.as_bytes());
        }
        request_builder.body(body).build().map_err(Into::into)
    }
}

#[async_trait]
impl BaseHttpClient for ReqwestHttpClient {
    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Error> {
        let request = self.build_request(request)?;
        tracing::debug!(method = %request.method(), url = %request.url(), "Performing request");

        // The client timeout covers the exchange, this one also covers reading the body.
        let exchange = async {
            let response = self.client.execute(request).await?;
            let status_code = response.status();
            let headers = response.headers().clone();
            let text = response.text().await?;
            Ok::<_, Error>((status_code, headers, text))
        };
        let (status_code, headers, text) = timeout(self.timeout, exchange).await.map_err(|_| Error::Timeout)??;

        if !status_code.is_success() {
            tracing::debug!(status = %status_code, "Request rejected");
            return Err(Error::Status {
                status: status_code,
                body: text,
            });
        }

        let mut http_response = http::response::Response::builder().status(status_code);
        if let Some(header_map) = http_response.headers_mut() {
            header_map.extend(headers);
        }
        http_response.body(text).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use http::header::{AUTHORIZATION, CONTENT_TYPE};
    use test_log::test;

    #[test]
    fn build_request_keeps_uri_headers_and_body() {
        let client = ReqwestHttpClient::new(DEFAULT_TIMEOUT).unwrap();
        let request = http::request::Request::builder()
            .method(Method::POST)
            .uri("http://127.0.0.1:5000/add-journal")
            .header(AUTHORIZATION, "Bearer secret")
            .header(CONTENT_TYPE, "application/json")
            .body(br#"{"id":"user-123","content":"hi"}"#.to_vec())
            .unwrap();

        let built = client.build_request(request).unwrap();
        assert_eq!(built.method(), Method::POST);
        assert_eq!(built.url().as_str(), "http://127.0.0.1:5000/add-journal");
        assert_eq!(built.headers()[AUTHORIZATION], "Bearer secret");
        assert_eq!(built.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            built.body().and_then(reqwest::Body::as_bytes),
            Some(br#"{"id":"user-123","content":"hi"}"#.as_slice())
        );
    }

    #[test(tokio::test)]
    async fn unreachable_host_is_classified() {
        // Port 9 (discard) is closed on test machines, the connect fails immediately.
        let client = ReqwestHttpClient::new(Duration::from_secs(5)).unwrap();
        let request = http::request::Request::builder()
            .uri("http://127.0.0.1:9/get-journals/user-123")
            .body(vec![])
            .unwrap();

        let err = client.request_text(request).await.unwrap_err();
        assert!(matches!(err, Error::Unreachable(_) | Error::Timeout), "{err:?}");
    }
}
