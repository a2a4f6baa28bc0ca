pub mod diagnosis;
pub mod health;
pub mod metrics;

pub use diagnosis::{DiagnosisReport, DiagnosisService};
pub use health::{health_router, ComponentHealth, HealthResponse, HealthState, HealthStatus};
pub use metrics::{Metrics, MetricsSnapshot};
