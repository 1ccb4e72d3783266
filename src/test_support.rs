//! In-process stand-in for the planner backend, served by axum on an
//! ephemeral localhost port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
pub struct FakeBackend {
    plan: Value,
    plan_status: u16,
    plan_delay: Duration,
    submit_status: u16,
    received: Arc<Mutex<Vec<Received>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            plan: json!([]),
            plan_status: 200,
            plan_delay: Duration::ZERO,
            submit_status: 201,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeBackend {
    pub fn with_plan(mut self, plan: Value) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_plan_status(mut self, status: u16) -> Self {
        self.plan_status = status;
        self
    }

    pub fn with_plan_delay(mut self, delay: Duration) -> Self {
        self.plan_delay = delay;
        self
    }

    pub fn with_submit_status(mut self, status: u16) -> Self {
        self.submit_status = status;
        self
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    fn record(&self, path: &str, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.received.lock().unwrap().push(Received {
            path: path.to_string(),
            authorization,
            body,
        });
    }

    /// Serves the backend and returns its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/planejamento", get(plan))
            .route("/adicionar-ingrediente", post(add_ingredient))
            .route("/adicionar-planejamento", post(add_to_plan))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

async fn plan(State(backend): State<FakeBackend>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    backend.record("/planejamento", &headers, Value::Null);
    if !backend.plan_delay.is_zero() {
        tokio::time::sleep(backend.plan_delay).await;
    }
    (status(backend.plan_status), Json(backend.plan.clone()))
}

async fn add_ingredient(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    backend.record("/adicionar-ingrediente", &headers, body);
    status(backend.submit_status)
}

async fn add_to_plan(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    backend.record("/adicionar-planejamento", &headers, body);
    status(backend.submit_status)
}
