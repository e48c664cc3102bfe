// In-process upstream used by the client tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger::Logger;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {

    /// Answers every request with `status` and `body`.
    pub async fn start(status: u16, body: impl Into<String>) -> Self {

        Self::start_delayed(status, body, Duration::ZERO).await

    }

    /// Like [`StubServer::start`], but waits `delay` before answering.
    pub async fn start_delayed(status: u16, body: impl Into<String>, delay: Duration) -> Self {

        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status: StatusCode::from_u16(status).expect("invalid stub status"),
            body: body.into(),
            delay,
            requests: requests.clone(),
        };

        let app = Router::new()
            .fallback(record)
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr()
            .expect("Failed to get local address");

        tokio::spawn(async move {
            axum::serve(listener, app).await
                .expect("Stub server failed");
        });

        StubServer { addr, requests }

    }

    pub fn config(&self) -> Config {

        Config {
            api_key: "sk-test".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 64,
            temperature: 0.9,
            base_url: format!("http://{}/v1", self.addr),
        }

    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {

    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    });

    tokio::time::sleep(state.delay).await;

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )

}

/// A base url nothing listens on.
pub async fn closed_port_config() -> Config {

    let listener = TcpListener::bind("127.0.0.1:0").await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local address");
    drop(listener);

    Config {
        base_url: format!("http://{}/v1", addr),
        ..Config::default()
    }

}

/// Keeps every message it is given.
#[derive(Default)]
pub struct RecordingLogger {
    messages: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
