//! Heartbeat classification on top of a loaded `Model`.

use std::sync::Arc;
use tracing::debug;

use super::Model;
use crate::config::OutputKind;
use crate::domain::{EcgSample, Prediction, NUM_CLASSES, SAMPLE_LEN};
use crate::error::{HeartbeatError, Result};

/// Reshapes samples for the network and turns its output into a `Prediction`.
#[derive(Clone)]
pub struct HeartbeatClassifier {
    model: Arc<dyn Model>,
    output: OutputKind,
}

impl std::fmt::Debug for HeartbeatClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeartbeatClassifier")
            .field("backend", &self.model.backend())
            .field("input_shape", &self.model.input_shape())
            .field("output", &self.output)
            .finish()
    }
}

impl HeartbeatClassifier {
    /// Wrap a model, checking it takes one 187-reading beat and scores 5 classes.
    pub fn new(model: Arc<dyn Model>, output: OutputKind) -> Result<Self> {
        let input_elems: usize = model.input_shape().iter().product();
        if input_elems != SAMPLE_LEN {
            return Err(HeartbeatError::ModelLoad(format!(
                "model input {:?} holds {} elements, expected {}",
                model.input_shape(),
                input_elems,
                SAMPLE_LEN
            )));
        }
        if model.output_dim() != NUM_CLASSES {
            return Err(HeartbeatError::ModelLoad(format!(
                "model output has {} elements, expected {}",
                model.output_dim(),
                NUM_CLASSES
            )));
        }
        Ok(Self { model, output })
    }

    pub fn backend(&self) -> &'static str {
        self.model.backend()
    }

    pub fn input_shape(&self) -> Vec<usize> {
        self.model.input_shape()
    }

    pub fn output_dim(&self) -> usize {
        self.model.output_dim()
    }

    pub fn output_kind(&self) -> OutputKind {
        self.output
    }

    /// Classify one beat. Deterministic for a fixed model.
    pub fn classify(&self, sample: &EcgSample) -> Result<Prediction> {
        // A (1, 187, 1) row-major tensor has the same element order as the
        // flat readings, so the reshape is a reinterpretation of the buffer.
        let raw = self.model.predict(sample.values())?;

        let probabilities = match self.output {
            OutputKind::Probabilities => raw,
            OutputKind::Logits => softmax(&raw),
        };

        debug!(?probabilities, "model output");

        let len = probabilities.len();
        Prediction::from_probabilities(probabilities).ok_or_else(|| {
            HeartbeatError::Inference(format!(
                "model returned {len} scores (expected {NUM_CLASSES} finite values)"
            ))
        })
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}
