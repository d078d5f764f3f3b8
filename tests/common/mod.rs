//! Mock Gemini endpoint shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use tokio::net::TcpListener;

use trip_planner::planner::AnswerProfile;

/// Maximum time any test is allowed to run before we consider it hung.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method_path: String,
    pub key: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// Canned Gemini endpoint: answers every call with the same status and body.
#[derive(Clone)]
pub struct MockGemini {
    status: StatusCode,
    body: &'static str,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockGemini {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn generate_content(
    State(mock): State<MockGemini>,
    Path(method_path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    mock.calls.lock().unwrap().push(RecordedCall {
        method_path,
        key: query.get("key").cloned(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    });
    (mock.status, mock.body.to_string())
}

/// Start the mock on a random port; returns its `/v1beta` base URL.
pub async fn start_mock_gemini(status: u16, body: &'static str) -> (String, MockGemini) {
    let mock = MockGemini {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        calls: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/v1beta/models/{method_path}", post(generate_content))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://127.0.0.1:{port}/v1beta"), mock)
}

/// A fully answered profile.
pub fn sample_profile() -> AnswerProfile {
    AnswerProfile {
        destination: "Kyoto".to_string(),
        duration: NonZeroU32::new(4).unwrap(),
        budget: "moderate".to_string(),
        interests: "temples".to_string(),
        accommodation: "ryokan".to_string(),
        dietary: "vegetarian".to_string(),
        specific_interests: "gardens".to_string(),
        mobility: "none".to_string(),
        additional_reqs: "none".to_string(),
    }
}
