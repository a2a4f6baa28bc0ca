//! Model loading and inference.
//!
//! The classifier artifact is loaded once at startup and shared read-only
//! behind an `Arc<dyn Model>`; nothing mutates it after `load_model` returns.

pub mod classifier;
pub mod dense;
#[cfg(feature = "onnx")]
pub mod onnx;

pub use classifier::HeartbeatClassifier;
pub use dense::{Activation, DenseLayer, DenseNetwork};
#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::ModelConfig;
use crate::domain::TENSOR_SHAPE;
use crate::error::{HeartbeatError, Result};

/// A loaded network: flat `f32` input in, flat `f32` output vector out.
#[cfg_attr(test, mockall::automock)]
pub trait Model: Send + Sync {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Input shape including the batch dimension
    fn input_shape(&self) -> Vec<usize>;

    /// Length of the output vector
    fn output_dim(&self) -> usize;

    /// Run a forward pass on one flattened input tensor.
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>>;
}

/// Load the configured artifact, picking the backend from its extension.
pub fn load_model(config: &ModelConfig) -> Result<Arc<dyn Model>> {
    let path = config.path.as_path();
    if !path.is_file() {
        return Err(HeartbeatError::ModelLoad(format!(
            "model artifact not found: {}",
            path.display()
        )));
    }

    let model: Arc<dyn Model> = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Arc::new(DenseNetwork::from_file(path)?),
        Some("onnx") => load_onnx(path)?,
        other => {
            return Err(HeartbeatError::ModelLoad(format!(
                "unsupported model format {:?} (expected .onnx or .json)",
                other.unwrap_or("")
            )))
        }
    };

    info!(
        backend = model.backend(),
        path = %path.display(),
        input_shape = ?model.input_shape(),
        output_dim = model.output_dim(),
        "model loaded"
    );
    Ok(model)
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> Result<Arc<dyn Model>> {
    Ok(Arc::new(OnnxModel::load_for_tensor_input(
        path,
        &TENSOR_SHAPE,
    )?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> Result<Arc<dyn Model>> {
    let _ = TENSOR_SHAPE;
    Err(HeartbeatError::ModelLoad(format!(
        "{} is an ONNX model but this build has the `onnx` feature disabled",
        path.display()
    )))
}
