use serde::Serialize;

use super::class::{HeartbeatClass, NUM_CLASSES};

/// Classifier verdict for one sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class: HeartbeatClass,
    /// Top probability as a percentage in [0, 100], widened before scaling
    pub confidence: f64,
    /// Full distribution, indexed like `HeartbeatClass::ALL`
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Argmax over a probability vector.
    ///
    /// Ties resolve to the lowest index. Returns `None` when the vector
    /// does not have one entry per class or holds a non-finite value.
    pub fn from_probabilities(probabilities: Vec<f32>) -> Option<Self> {
        if probabilities.len() != NUM_CLASSES || probabilities.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let (index, max) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, p)| {
                if p > best.1 {
                    (i, p)
                } else {
                    best
                }
            });

        Some(Self {
            class: HeartbeatClass::from_index(index)?,
            confidence: (f64::from(max) * 100.0).clamp(0.0, 100.0),
            probabilities,
        })
    }

    pub fn class_index(&self) -> usize {
        self.class.index()
    }

    pub fn label(&self) -> &'static str {
        self.class.label()
    }
}
