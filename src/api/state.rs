use std::sync::Arc;

use crate::api::page::PageRenderer;
use crate::error::Result;
use crate::services::{DiagnosisService, HealthState};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Classification pipeline (shared read-only model inside)
    pub diagnosis: DiagnosisService,

    /// Health and counters
    pub health: Arc<HealthState>,

    /// Page templates
    pub pages: Arc<PageRenderer>,

    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        diagnosis: DiagnosisService,
        health: Arc<HealthState>,
        max_upload_bytes: usize,
    ) -> Result<Self> {
        Ok(Self {
            diagnosis,
            health,
            pages: Arc::new(PageRenderer::new()?),
            max_upload_bytes,
        })
    }
}
