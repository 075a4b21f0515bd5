#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request as seen by the stub upstream.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Arc<Vec<u8>>,
    delay: Duration,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// Stand-in for a hosted API: answers every path with a fixed status and body.
pub struct Stub {
    pub base: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Stub {
    pub async fn start(status: StatusCode, reply: impl Into<Vec<u8>>) -> Self {
        Self::start_delayed(status, reply, Duration::ZERO).await
    }

    pub async fn json(reply: &Value) -> Self {
        Self::start(StatusCode::OK, reply.to_string()).await
    }

    pub async fn start_delayed(
        status: StatusCode,
        reply: impl Into<Vec<u8>>,
        delay: Duration,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            reply: Arc::new(reply.into()),
            delay,
            requests: requests.clone(),
        };
        let router = Router::new().fallback(record).with_state(state);
        Self {
            base: serve(router).await,
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Vec<u8>) {
    state.requests.lock().unwrap().push(Recorded {
        path: uri.path().to_string(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.reply.as_ref().clone())
}

/// Bind an ephemeral port, serve `router` in the background, return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
