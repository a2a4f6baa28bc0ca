//! Startup wiring: model, pipeline and web state from config.
//!
//! Everything that can fail at startup fails here, before any port is bound.

use std::sync::Arc;
use tracing::info;

use crate::api::AppState;
use crate::config::{AppConfig, ModelConfig};
use crate::error::{HeartbeatError, Result};
use crate::ml::{load_model, HeartbeatClassifier};
use crate::services::{DiagnosisService, HealthState, Metrics};

/// Load the model and build the diagnosis pipeline around it.
pub fn build_diagnosis(model_config: &ModelConfig) -> Result<DiagnosisService> {
    let model = load_model(model_config)?;
    let classifier = HeartbeatClassifier::new(model, model_config.output)?;
    info!(
        backend = classifier.backend(),
        output = ?classifier.output_kind(),
        "classifier ready"
    );
    Ok(DiagnosisService::new(
        Arc::new(classifier),
        Arc::new(Metrics::new()),
    ))
}

/// Full web application state.
pub fn build_app_state(config: &AppConfig) -> Result<AppState> {
    config
        .validate()
        .map_err(|errors| HeartbeatError::Validation(errors.join("; ")))?;

    let diagnosis = build_diagnosis(&config.model)?;
    let health = Arc::new(HealthState::new(
        diagnosis.classifier().backend(),
        config.model.path.clone(),
        diagnosis.classifier().input_shape(),
        diagnosis.metrics(),
    ));

    AppState::new(diagnosis, health, config.server.max_upload_bytes)
}
