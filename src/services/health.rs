//! Health and metrics endpoints for process supervision.
//!
//! The model is loaded before the server binds, so a running process
//! always has one; readiness reflects inference failures seen so far.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use super::{Metrics, MetricsSnapshot};
use crate::domain::HeartbeatClass;

/// Health status for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// Component health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Overall system health response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub components: Vec<ComponentHealth>,
    pub metrics: MetricsSnapshot,
}

/// Shared state for health endpoints
#[derive(Debug)]
pub struct HealthState {
    /// When the server started
    pub started_at: DateTime<Utc>,
    /// Loaded model backend ("onnx", "dense")
    pub backend: &'static str,
    /// Artifact the model was loaded from
    pub model_path: PathBuf,
    /// Model input shape including batch
    pub input_shape: Vec<usize>,
    /// Request/prediction counters
    pub metrics: Arc<Metrics>,
}

impl HealthState {
    pub fn new(
        backend: &'static str,
        model_path: PathBuf,
        input_shape: Vec<usize>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            started_at: Utc::now(),
            backend,
            model_path,
            input_shape,
            metrics,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }

    /// Get overall health status
    pub fn get_health(&self) -> HealthResponse {
        let snapshot = self.metrics.snapshot();

        // Every attempt failing means the model is loaded but unusable.
        let attempts = snapshot.predictions_total() + snapshot.inference_failures;
        let model_status = if snapshot.inference_failures == 0 {
            HealthStatus::Healthy
        } else if snapshot.inference_failures < attempts {
            HealthStatus::Degraded
        } else {
            HealthStatus::Unhealthy
        };

        let components = vec![ComponentHealth {
            name: "model".to_string(),
            status: model_status,
            message: Some(format!(
                "{} {:?} from {}",
                self.backend,
                self.input_shape,
                self.model_path.display()
            )),
        }];

        HealthResponse {
            status: model_status,
            timestamp: Utc::now(),
            uptime_seconds: self.uptime_seconds(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            components,
            metrics: snapshot,
        }
    }
}

/// Routes for `/health`, `/healthz`, `/readyz` and `/metrics`.
pub fn health_router(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(liveness_handler))
        .route("/readyz", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Full health check endpoint
async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let health = state.get_health();
    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK, // Still return 200 for degraded
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(health))
}

/// Liveness probe - is the process alive?
async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Readiness probe - is the service ready to handle traffic?
async fn readiness_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    match state.get_health().status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Prometheus metrics endpoint
async fn metrics_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let health = state.get_health();
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        render_prometheus(&health),
    )
}

fn render_prometheus(health: &HealthResponse) -> String {
    let m = &health.metrics;
    let up = match health.status {
        HealthStatus::Healthy => 1,
        HealthStatus::Degraded => 0,
        HealthStatus::Unhealthy => -1,
    };

    let mut per_class = String::new();
    for class in HeartbeatClass::ALL {
        per_class.push_str(&format!(
            "heartbeat_predictions_total{{class=\"{}\"}} {}\n",
            class.code(),
            m.predictions[class.index()]
        ));
    }

    format!(
        r#"# HELP heartbeat_up Health status (1=healthy, 0=degraded, -1=unhealthy)
# TYPE heartbeat_up gauge
heartbeat_up {}

# HELP heartbeat_uptime_seconds Uptime in seconds
# TYPE heartbeat_uptime_seconds counter
heartbeat_uptime_seconds {}

# HELP heartbeat_requests_total Classification requests by input source
# TYPE heartbeat_requests_total counter
heartbeat_requests_total{{source="csv"}} {}
heartbeat_requests_total{{source="text"}} {}
heartbeat_requests_total{{source="values"}} {}

# HELP heartbeat_predictions_total Successful predictions by class
# TYPE heartbeat_predictions_total counter
{}
# HELP heartbeat_rejected_inputs_total Requests rejected by input validation
# TYPE heartbeat_rejected_inputs_total counter
heartbeat_rejected_inputs_total {}

# HELP heartbeat_inference_failures_total Failed model invocations
# TYPE heartbeat_inference_failures_total counter
heartbeat_inference_failures_total {}

# HELP heartbeat_inference_seconds_total Cumulative time spent in the model
# TYPE heartbeat_inference_seconds_total counter
heartbeat_inference_seconds_total {:.6}
"#,
        up,
        health.uptime_seconds,
        m.csv_requests,
        m.text_requests,
        m.values_requests,
        per_class,
        m.rejected_inputs,
        m.inference_failures,
        m.inference_micros as f64 / 1_000_000.0,
    )
}
