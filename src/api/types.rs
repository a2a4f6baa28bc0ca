use serde::{Deserialize, Serialize};

use crate::domain::HeartbeatClass;

// ============================================================================
// Form Types
// ============================================================================

/// Body of `POST /predict/text`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextForm {
    #[serde(default)]
    pub values: String,
}

// ============================================================================
// JSON API Types
// ============================================================================

/// Body of `POST /api/v1/predict`: either readings or pasted text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PredictRequest {
    Values { values: Vec<f32> },
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassInfo {
    pub index: usize,
    pub code: String,
    pub label: String,
}

impl From<HeartbeatClass> for ClassInfo {
    fn from(class: HeartbeatClass) -> Self {
        Self {
            index: class.index(),
            code: class.code().to_string(),
            label: class.label().to_string(),
        }
    }
}

// ============================================================================
// Page Types
// ============================================================================

/// Which input tab the page opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Csv,
    Text,
}

/// Outcome block rendered under the active tab
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultView {
    pub diagnosis: Option<String>,
    pub confidence: Option<String>,
    pub error: Option<String>,
}

/// Everything the page template needs
#[derive(Debug, Clone, Serialize, Default)]
pub struct PageView {
    pub active_tab: Tab,
    pub sample_len: usize,
    pub text_input: String,
    pub csv_filename: Option<String>,
    pub result: Option<ResultView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_request_variants() {
        let req: PredictRequest = serde_json::from_str(r#"{"values": [0.1, 0.2]}"#).unwrap();
        assert!(matches!(req, PredictRequest::Values { ref values } if values.len() == 2));

        let req: PredictRequest = serde_json::from_str(r#"{"text": "0.1\t0.2"}"#).unwrap();
        assert!(matches!(req, PredictRequest::Text { .. }));

        assert!(serde_json::from_str::<PredictRequest>(r#"{"other": 1}"#).is_err());
    }
}
