//! ONNX inference wrapper (pure Rust via `tract-onnx`).
//!
//! The Keras CNN is exported once to ONNX (e.g. with `tf2onnx`) and served
//! from here without Python at runtime.

use std::path::Path;

use tract_onnx::prelude::*;

use super::Model;
use crate::error::{HeartbeatError, Result};

#[derive(Clone)]
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
    input_shape: Vec<usize>,
    output_dim: usize,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input_shape", &self.input_shape)
            .field("output_dim", &self.output_dim)
            .finish()
    }
}

impl OnnxModel {
    /// Load an ONNX model and specialize it to a fixed `f32` tensor input.
    ///
    /// `input_shape` must include the batch dimension (typically `1`).
    pub fn load_for_tensor_input(path: &Path, input_shape: &[usize]) -> Result<Self> {
        if input_shape.is_empty() {
            return Err(HeartbeatError::Validation(
                "input_shape must have at least 1 dimension".to_string(),
            ));
        }
        if input_shape.iter().any(|d| *d == 0) {
            return Err(HeartbeatError::Validation(
                "input_shape dimensions must all be > 0".to_string(),
            ));
        }

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| HeartbeatError::ModelLoad(format!("onnx load failed: {e}")))?;

        let shape: TVec<usize> = input_shape.iter().copied().collect();

        let model = model
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), shape))
            .map_err(|e| HeartbeatError::ModelLoad(format!("onnx input fact failed: {e}")))?;

        let plan = model
            .into_optimized()
            .map_err(|e| HeartbeatError::ModelLoad(format!("onnx optimize failed: {e}")))?
            .into_runnable()
            .map_err(|e| HeartbeatError::ModelLoad(format!("onnx runnable failed: {e}")))?;

        // Infer output_dim by running a dummy forward pass.
        let dummy = tract_ndarray::ArrayD::<f32>::zeros(tract_ndarray::IxDyn(input_shape))
            .into_tvalue();
        let outputs = plan
            .run(tvec!(dummy))
            .map_err(|e| HeartbeatError::ModelLoad(format!("onnx warmup run failed: {e}")))?;
        let out0 = outputs
            .first()
            .ok_or_else(|| HeartbeatError::ModelLoad("onnx produced no outputs".to_string()))?;
        let output_dim = out0
            .to_array_view::<f32>()
            .map_err(|e| HeartbeatError::ModelLoad(format!("onnx output decode failed: {e}")))?
            .len();
        if output_dim == 0 {
            return Err(HeartbeatError::ModelLoad(
                "onnx output has zero elements".to_string(),
            ));
        }

        Ok(Self {
            plan,
            input_shape: input_shape.to_vec(),
            output_dim,
        })
    }

    pub fn input_elem_count(&self) -> usize {
        self.input_shape.iter().product()
    }
}

impl Model for OnnxModel {
    fn backend(&self) -> &'static str {
        "onnx"
    }

    fn input_shape(&self) -> Vec<usize> {
        self.input_shape.clone()
    }

    fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Run inference on one flattened input tensor.
    fn predict(&self, input: &[f32]) -> Result<Vec<f32>> {
        let expected = self.input_elem_count();
        if input.len() != expected {
            return Err(HeartbeatError::Inference(format!(
                "onnx input dim mismatch: got {}, expected {} (shape={:?})",
                input.len(),
                expected,
                self.input_shape
            )));
        }

        let tensor = tract_ndarray::ArrayD::<f32>::from_shape_vec(
            tract_ndarray::IxDyn(&self.input_shape),
            input.to_vec(),
        )
        .map_err(|e| HeartbeatError::Inference(format!("onnx input reshape failed: {e}")))?
        .into_tvalue();

        let outputs = self
            .plan
            .run(tvec!(tensor))
            .map_err(|e| HeartbeatError::Inference(format!("onnx run failed: {e}")))?;
        let out0 = outputs
            .first()
            .ok_or_else(|| HeartbeatError::Inference("onnx produced no outputs".to_string()))?;

        let arr = out0
            .to_array_view::<f32>()
            .map_err(|e| HeartbeatError::Inference(format!("onnx output decode failed: {e}")))?;

        Ok(arr.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NUM_CLASSES, SAMPLE_LEN, TENSOR_SHAPE};

    fn fixture() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/residue_softmax.onnx")
    }

    #[test]
    fn test_load_specializes_input_and_learns_output_dim() {
        let model = OnnxModel::load_for_tensor_input(&fixture(), &TENSOR_SHAPE).unwrap();
        assert_eq!(model.input_shape(), vec![1, SAMPLE_LEN, 1]);
        assert_eq!(model.input_elem_count(), SAMPLE_LEN);
        assert_eq!(model.output_dim(), NUM_CLASSES);
        assert_eq!(model.backend(), "onnx");
    }

    #[test]
    fn test_predict_returns_one_score_per_class() {
        let model = OnnxModel::load_for_tensor_input(&fixture(), &TENSOR_SHAPE).unwrap();

        let mut input = vec![0.0f32; SAMPLE_LEN];
        input[3] = 1.0;
        let scores = model.predict(&input).unwrap();

        assert_eq!(scores.len(), NUM_CLASSES);
        assert!((scores.iter().sum::<f32>() - 1.0).abs() < 1e-4);
        let e = std::f32::consts::E;
        assert!((scores[3] - e / (e + 4.0)).abs() < 1e-4);
    }

    #[test]
    fn test_predict_rejects_wrong_length() {
        let model = OnnxModel::load_for_tensor_input(&fixture(), &TENSOR_SHAPE).unwrap();
        let err = model.predict(&[0.0; 10]).unwrap_err();
        assert!(matches!(err, HeartbeatError::Inference(_)));
    }

    #[test]
    fn test_empty_shape_is_refused() {
        let err = OnnxModel::load_for_tensor_input(&fixture(), &[]).unwrap_err();
        assert!(matches!(err, HeartbeatError::Validation(_)));
    }
}
