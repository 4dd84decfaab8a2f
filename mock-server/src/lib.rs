use std::{sync::Arc, time::Duration};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// A request as the server saw it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query exactly as sent on the request line.
    pub uri: String,
    /// Every header line in arrival order. Names are lowercase.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header_values(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

#[derive(Deserialize)]
struct SlowParams {
    #[serde(default = "default_delay_ms")]
    ms: u64,
}

fn default_delay_ms() -> u64 {
    1000
}

/// Routes:
/// - `GET /slow?ms=N` sleeps N milliseconds, then answers 200.
/// - `ANY /status/{code}` answers with `code` and `{"status": code}`.
/// - `GET /_requests` lists everything recorded so far.
/// - anything else is recorded and answered with `{"message":"greetings"}`.
pub fn app(log: RequestLog) -> Router {
    Router::new()
        .route("/slow", get(slow))
        .route("/status/{code}", any(status))
        .route("/_requests", get(list_requests))
        .fallback(record)
        .with_state(log)
}

pub async fn run(listener: TcpListener, log: RequestLog) -> Result<(), std::io::Error> {
    axum::serve(listener, app(log)).await
}

async fn record(
    State(log): State<RequestLog>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    let recorded = RecordedRequest {
        method: method.to_string(),
        uri: uri.to_string(),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    tracing::info!(method = %recorded.method, uri = %recorded.uri, "recorded request");
    log.write().await.push(recorded);
    Json(json!({ "message": "greetings" }))
}

async fn slow(Query(params): Query<SlowParams>) -> StatusCode {
    tokio::time::sleep(Duration::from_millis(params.ms)).await;
    StatusCode::OK
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Value>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(json!({ "status": code })))
}

async fn list_requests(State(log): State<RequestLog>) -> Json<Vec<RecordedRequest>> {
    Json(log.read().await.clone())
}
