//! Shared test harness for E2E integration tests.
//!
//! Wires the dashboard router to a configurable backend and preference
//! store, exercising real code paths across all crate boundaries.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use jv_dashboard_api::backend::{DashboardBackend, HttpBackend, MockBackend};
use jv_dashboard_api::config::BackendConfig;
use jv_dashboard_api::routes::build_router;
use jv_dashboard_api::state::AppState;
use jv_preferences::{JsonFileStore, MemoryStore, UserPreferencesStore};

/// End-to-end harness around one `AppState` and its router.
pub struct TestHarness {
    pub state: AppState,
    pub router: Router,
}

impl TestHarness {
    /// Sample backend data, in-memory preferences.
    pub fn with_sample_data() -> Self {
        Self::from_state(AppState::with_sample_data())
    }

    /// Scripted backend the test keeps a handle to, in-memory preferences.
    pub fn with_mock(backend: Arc<MockBackend>) -> Self {
        Self::with_parts(backend, Arc::new(MemoryStore::new()))
    }

    /// Real HTTP backend pointed at `url` (usually a wiremock server).
    pub fn with_upstream(url: &str) -> Self {
        let backend = HttpBackend::new(&BackendConfig {
            url: url.to_string(),
            timeout_secs: 2,
        })
        .unwrap();
        Self::with_parts(Arc::new(backend), Arc::new(MemoryStore::new()))
    }

    /// Sample backend, preferences persisted in `path`.
    pub fn with_preferences_file(path: &Path) -> Self {
        Self::with_parts(
            Arc::new(MockBackend::with_sample_data()),
            Arc::new(JsonFileStore::new(path)),
        )
    }

    pub fn with_parts(
        backend: Arc<dyn DashboardBackend>,
        preferences: Arc<dyn UserPreferencesStore>,
    ) -> Self {
        Self::from_state(AppState::new(backend, preferences))
    }

    fn from_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Send a request and return (status, JSON body or `Null` when empty).
    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    /// POST /api/v1/filters/infer
    pub async fn infer(&self, body: Value) -> (StatusCode, Value) {
        self.send_json("POST", "/api/v1/filters/infer", &body).await
    }

    /// POST /api/v1/commands
    pub async fn command(&self, body: Value) -> (StatusCode, Value) {
        self.send_json("POST", "/api/v1/commands", &body).await
    }
}

/// String array field as a `Vec<String>` for compact assertions.
pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}
