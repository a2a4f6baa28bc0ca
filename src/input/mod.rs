//! Request input adapters.
//!
//! Both paths end in an `EcgSample`; the model is never called with
//! anything that has not been through one of these.

pub mod tabular;
pub mod text;

pub use tabular::parse_csv;
pub use text::parse_text;

use serde::{Deserialize, Serialize};

/// Where a request's readings came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Uploaded CSV file
    Csv,
    /// Pasted comma/tab/newline separated text
    Text,
    /// JSON array from the API
    Values,
}

impl InputSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputSource::Csv => "csv",
            InputSource::Text => "text",
            InputSource::Values => "values",
        }
    }
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
