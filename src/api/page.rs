//! Server-rendered single page (minijinja, HTML autoescaping on).

use minijinja::Environment;

use crate::api::types::{PageView, ResultView, Tab};
use crate::domain::SAMPLE_LEN;
use crate::error::Result;
use crate::services::DiagnosisReport;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render(&self, view: &PageView) -> Result<String> {
        let template = self.env.get_template("index.html")?;
        Ok(template.render(view)?)
    }
}

impl PageView {
    /// Blank page on the given tab.
    pub fn empty(tab: Tab) -> Self {
        Self {
            active_tab: tab,
            sample_len: SAMPLE_LEN,
            ..Default::default()
        }
    }

    pub fn with_report(mut self, report: &DiagnosisReport) -> Self {
        self.result = Some(ResultView {
            diagnosis: report.diagnosis_line(),
            confidence: report.confidence_line(),
            error: report.error_message().map(str::to_string),
        });
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.result = Some(ResultView {
            diagnosis: None,
            confidence: None,
            error: Some(message.into()),
        });
        self
    }
}
