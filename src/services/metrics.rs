use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::{HeartbeatClass, NUM_CLASSES};
use crate::input::InputSource;

/// Metrics collector for observability
#[derive(Debug, Default)]
pub struct Metrics {
    /// CSV uploads received
    pub csv_requests: AtomicU64,
    /// Text submissions received
    pub text_requests: AtomicU64,
    /// JSON value arrays received
    pub values_requests: AtomicU64,
    /// Successful predictions, per class index
    pub predictions: [AtomicU64; NUM_CLASSES],
    /// Requests rejected before reaching the model
    pub rejected_inputs: AtomicU64,
    /// Model invocations that failed
    pub inference_failures: AtomicU64,
    /// Cumulative inference time in microseconds
    pub inference_micros: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub csv_requests: u64,
    pub text_requests: u64,
    pub values_requests: u64,
    pub predictions: [u64; NUM_CLASSES],
    pub rejected_inputs: u64,
    pub inference_failures: u64,
    pub inference_micros: u64,
}

impl MetricsSnapshot {
    pub fn predictions_total(&self) -> u64 {
        self.predictions.iter().sum()
    }

    pub fn requests_total(&self) -> u64 {
        self.csv_requests + self.text_requests + self.values_requests
    }
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an incoming request by source
    pub fn record_request(&self, source: InputSource) {
        let counter = match source {
            InputSource::Csv => &self.csv_requests,
            InputSource::Text => &self.text_requests,
            InputSource::Values => &self.values_requests,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a successful prediction and its latency
    pub fn record_prediction(&self, class: HeartbeatClass, elapsed: Duration) {
        self.predictions[class.index()].fetch_add(1, Ordering::Relaxed);
        self.inference_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Count an input rejected by validation
    pub fn record_rejected(&self) {
        self.rejected_inputs.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a failed model invocation
    pub fn record_inference_failure(&self) {
        self.inference_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            csv_requests: self.csv_requests.load(Ordering::Relaxed),
            text_requests: self.text_requests.load(Ordering::Relaxed),
            values_requests: self.values_requests.load(Ordering::Relaxed),
            predictions: std::array::from_fn(|i| self.predictions[i].load(Ordering::Relaxed)),
            rejected_inputs: self.rejected_inputs.load(Ordering::Relaxed),
            inference_failures: self.inference_failures.load(Ordering::Relaxed),
            inference_micros: self.inference_micros.load(Ordering::Relaxed),
        }
    }

    /// Get current metrics as a formatted string
    pub fn summary(&self) -> String {
        let s = self.snapshot();
        let per_class = HeartbeatClass::ALL
            .iter()
            .map(|c| format!("{}={}", c.code(), s.predictions[c.index()]))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "requests={} (csv={} text={} values={}) predictions={} [{}] rejected={} failures={}",
            s.requests_total(),
            s.csv_requests,
            s.text_requests,
            s.values_requests,
            s.predictions_total(),
            per_class,
            s.rejected_inputs,
            s.inference_failures,
        )
    }
}
