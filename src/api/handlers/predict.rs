use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use tracing::warn;

use super::run_blocking;
use crate::api::{
    state::AppState,
    types::{ClassInfo, ErrorResponse, PredictRequest},
};
use crate::domain::HeartbeatClass;
use crate::input::InputSource;
use crate::services::DiagnosisReport;

/// POST /api/v1/predict
pub async fn api_predict(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PredictRequest>, JsonRejection>,
) -> std::result::Result<Json<DiagnosisReport>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "unreadable predict body");
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    let service = state.diagnosis.clone();
    let (source, result) = match request {
        PredictRequest::Values { values } => (
            InputSource::Values,
            run_blocking(move || service.diagnose_values(values)).await,
        ),
        PredictRequest::Text { text } => (
            InputSource::Text,
            run_blocking(move || service.diagnose_text(&text)).await,
        ),
    };

    match result {
        Ok(_) => Ok(Json(state.diagnosis.report(source, &result))),
        Err(ref e) => {
            let status = if e.is_input_error() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let error = state
                .diagnosis
                .report(source, &result)
                .error_message()
                .unwrap_or_default()
                .to_string();
            Err((status, Json(ErrorResponse { error })))
        }
    }
}

/// GET /api/v1/classes
pub async fn api_classes() -> Json<Vec<ClassInfo>> {
    Json(HeartbeatClass::ALL.into_iter().map(ClassInfo::from).collect())
}
