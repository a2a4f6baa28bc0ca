//! Request pipeline: adapter → validation → inference → report.
//!
//! Every call is independent. A failure ends that request only; nothing
//! here holds state beyond the shared classifier and counters.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use super::Metrics;
use crate::domain::{EcgSample, Prediction};
use crate::error::{HeartbeatError, Result};
use crate::input::{parse_csv, parse_text, InputSource};
use crate::ml::HeartbeatClassifier;

#[derive(Debug, Clone)]
pub struct DiagnosisService {
    classifier: Arc<HeartbeatClassifier>,
    metrics: Arc<Metrics>,
}

impl DiagnosisService {
    pub fn new(classifier: Arc<HeartbeatClassifier>, metrics: Arc<Metrics>) -> Self {
        Self {
            classifier,
            metrics,
        }
    }

    pub fn classifier(&self) -> &HeartbeatClassifier {
        &self.classifier
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    /// Classify an uploaded CSV file.
    pub fn diagnose_csv(&self, bytes: &[u8]) -> Result<Prediction> {
        self.run(InputSource::Csv, || parse_csv(bytes))
    }

    /// Classify pasted comma/tab/newline separated text.
    pub fn diagnose_text(&self, text: &str) -> Result<Prediction> {
        self.run(InputSource::Text, || Ok(parse_text(text)?))
    }

    /// Classify an already-numeric reading array.
    pub fn diagnose_values(&self, values: Vec<f32>) -> Result<Prediction> {
        self.run(InputSource::Values, || Ok(EcgSample::new(values)?))
    }

    /// Dispatch on source and render the outcome for display.
    pub fn report(&self, source: InputSource, result: &Result<Prediction>) -> DiagnosisReport {
        DiagnosisReport::from_result(source, result)
    }

    fn run<F>(&self, source: InputSource, parse: F) -> Result<Prediction>
    where
        F: FnOnce() -> Result<EcgSample>,
    {
        let span = info_span!("diagnose", %source, request_id = %Uuid::new_v4());
        let _guard = span.enter();

        self.metrics.record_request(source);

        let sample = match parse() {
            Ok(sample) => sample,
            Err(e) => {
                self.metrics.record_rejected();
                warn!(error = %e, "input rejected");
                return Err(e);
            }
        };

        let started = Instant::now();
        match self.classifier.classify(&sample) {
            Ok(prediction) => {
                let elapsed = started.elapsed();
                self.metrics.record_prediction(prediction.class, elapsed);
                info!(
                    class = prediction.class.code(),
                    confidence = %format!("{:.2}", prediction.confidence),
                    elapsed_us = elapsed.as_micros() as u64,
                    "diagnosis complete"
                );
                Ok(prediction)
            }
            Err(e) => {
                self.metrics.record_inference_failure();
                error!(error = %e, "inference failed");
                Err(e)
            }
        }
    }
}

/// What the user sees for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiagnosisReport {
    Diagnosed {
        class_index: usize,
        label: String,
        code: String,
        confidence: f64,
        probabilities: Vec<f32>,
    },
    Rejected {
        message: String,
    },
}

impl DiagnosisReport {
    pub fn from_result(source: InputSource, result: &Result<Prediction>) -> Self {
        match result {
            Ok(p) => Self::Diagnosed {
                class_index: p.class_index(),
                label: p.label().to_string(),
                code: p.class.code().to_string(),
                confidence: p.confidence,
                probabilities: p.probabilities.clone(),
            },
            Err(e) => Self::Rejected {
                message: rejection_message(source, e),
            },
        }
    }

    pub fn is_diagnosed(&self) -> bool {
        matches!(self, Self::Diagnosed { .. })
    }

    /// `Diagnosis: <label>`
    pub fn diagnosis_line(&self) -> Option<String> {
        match self {
            Self::Diagnosed { label, .. } => Some(format!("Diagnosis: {label}")),
            Self::Rejected { .. } => None,
        }
    }

    /// `Confidence: <pct>%` with two decimals
    pub fn confidence_line(&self) -> Option<String> {
        match self {
            Self::Diagnosed { confidence, .. } => Some(format!("Confidence: {confidence:.2}%")),
            Self::Rejected { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Diagnosed { .. } => None,
            Self::Rejected { message } => Some(message),
        }
    }

    /// Lines for plain-text output (CLI).
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Diagnosed { .. } => self
                .diagnosis_line()
                .into_iter()
                .chain(self.confidence_line())
                .collect(),
            Self::Rejected { message } => vec![message.clone()],
        }
    }
}

/// Wrong counts get the fixed per-source sentence; anything else is
/// prefixed the way each input path reports failures.
fn rejection_message(source: InputSource, err: &HeartbeatError) -> String {
    match (source, err) {
        (_, HeartbeatError::Input(e)) if e.is_length_error() => e.to_string(),
        (InputSource::Csv, e) => format!("Error: {e}"),
        (InputSource::Text, e) => format!("Invalid input: {e}"),
        (InputSource::Values, e) => e.to_string(),
    }
}
