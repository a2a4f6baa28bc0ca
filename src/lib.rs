//! ECG heartbeat classification: a pre-trained CNN behind a small web UI.
//!
//! A 187-reading beat arrives as a CSV upload, pasted text or JSON, is
//! validated into an [`EcgSample`], reshaped to `(1, 187, 1)` and scored
//! by the model loaded once at startup.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod input;
pub mod ml;
pub mod services;

pub use config::AppConfig;
pub use domain::{EcgSample, HeartbeatClass, Prediction, SAMPLE_LEN};
pub use error::{HeartbeatError, InputError, Result};
pub use services::{DiagnosisReport, DiagnosisService};
