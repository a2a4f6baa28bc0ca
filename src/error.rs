use thiserror::Error;

/// Main error type for the heartbeat service
#[derive(Error, Debug)]
pub enum HeartbeatError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Request input errors
    #[error("{0}")]
    Input(#[from] InputError),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    // Model errors
    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Rendering errors
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl HeartbeatError {
    /// True when the error was caused by the caller's input rather than the service.
    pub fn is_input_error(&self) -> bool {
        matches!(self, HeartbeatError::Input(_) | HeartbeatError::Csv(_))
    }
}

/// Result type alias for HeartbeatError
pub type Result<T> = std::result::Result<T, HeartbeatError>;

/// Specific error types for ECG request input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("CSV must contain exactly {expected} values.")]
    CsvLength { expected: usize, actual: usize },

    #[error("Please enter exactly {expected} numbers.")]
    TextLength { expected: usize, actual: usize },

    #[error("Expected {expected} values, got {actual}")]
    SampleLength { expected: usize, actual: usize },

    #[error("could not convert string to float: '{token}'")]
    NotANumber { token: String },

    #[error("Expected {expected} fields in line {line}, saw {actual}")]
    RaggedRow {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("No columns to parse from file")]
    EmptyFile,

    #[error("non-finite value {value} at position {index}")]
    NonFinite { index: usize, value: f32 },
}

impl InputError {
    /// Wrong element count, as opposed to malformed content.
    pub fn is_length_error(&self) -> bool {
        matches!(
            self,
            InputError::CsvLength { .. }
                | InputError::TextLength { .. }
                | InputError::SampleLength { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_messages_are_exact() {
        let csv = InputError::CsvLength {
            expected: 187,
            actual: 3,
        };
        assert_eq!(csv.to_string(), "CSV must contain exactly 187 values.");

        let text = InputError::TextLength {
            expected: 187,
            actual: 186,
        };
        assert_eq!(text.to_string(), "Please enter exactly 187 numbers.");
    }

    #[test]
    fn test_input_error_passes_through_display() {
        let err: HeartbeatError = InputError::NotANumber {
            token: "abc".to_string(),
        }
        .into();
        assert!(err.is_input_error());
        assert_eq!(err.to_string(), "could not convert string to float: 'abc'");
    }

    #[test]
    fn test_model_errors_are_not_input_errors() {
        let err = HeartbeatError::Inference("boom".to_string());
        assert!(!err.is_input_error());
    }
}
