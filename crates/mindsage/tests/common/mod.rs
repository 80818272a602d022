#![allow(dead_code)]

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use mindsage::{Config, SimpleClient};
use mindsage_http::{BaseHttpClient, Error, HttpRequest, HttpResponse};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const BASE_URL: &str = "http://mindsage.test/";

#[derive(Debug, Clone)]
pub enum Reply {
    Body(StatusCode, String),
    Timeout,
    Unreachable,
}

#[derive(Debug, Clone)]
struct Scripted {
    reply: Reply,
    delay: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// Transport answering requests from a queue of scripted replies, in issue order.
#[derive(Clone, Default)]
pub struct ScriptedHttpClient {
    replies: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedHttpClient {
    fn push(&self, reply: Reply, delay: Option<Duration>) -> &Self {
        self.replies.lock().unwrap().push_back(Scripted { reply, delay });
        self
    }

    pub fn reply(&self, status: StatusCode, body: Value) -> &Self {
        self.push(Reply::Body(status, body.to_string()), None)
    }

    pub fn reply_after(&self, delay: Duration, status: StatusCode, body: Value) -> &Self {
        self.push(Reply::Body(status, body.to_string()), Some(delay))
    }

    pub fn reply_raw(&self, status: StatusCode, body: &str) -> &Self {
        self.push(Reply::Body(status, body.to_owned()), None)
    }

    pub fn fail(&self, reply: Reply) -> &Self {
        self.push(reply, None)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseHttpClient for ScriptedHttpClient {
    async fn request_text(&self, request: HttpRequest) -> Result<HttpResponse<String>, Error> {
        let (parts, body) = request.into_parts();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });
        let scripted = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("request without scripted reply");

        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        match scripted.reply {
            Reply::Body(status, body) if status.is_success() => Ok(http::response::Response::builder()
                .status(status)
                .body(body)
                .unwrap()),
            Reply::Body(status, body) => Err(Error::Status { status, body }),
            Reply::Timeout => Err(Error::Timeout),
            Reply::Unreachable => Err(Error::Unreachable("connection refused".to_owned())),
        }
    }
}

pub type TestClient = SimpleClient<ScriptedHttpClient>;

pub fn client(http: &ScriptedHttpClient) -> Arc<TestClient> {
    let config = Config::new(Url::parse(BASE_URL).unwrap());
    Arc::new(SimpleClient::with_http_client(config, http.clone()))
}

pub fn stored_entry(id: i64, owner_id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "user_id": owner_id,
        "content": content,
        "dominant_emotion": "neutral",
        "created_at": "2025-02-11T18:04:05.123456+00:00"
    })
}

pub fn analysis(dominant_emotion: &str, suicide_risk: bool) -> Value {
    json!({
        "message": "Journal entry analyzed!",
        "summary": "summary",
        "emotions": {dominant_emotion: 0.8},
        "dominant_emotion": dominant_emotion,
        "activity_suggestion": format!("activity for {dominant_emotion}"),
        "suicide_risk": suicide_risk,
        "insights": format!("insights for {dominant_emotion}")
    })
}
