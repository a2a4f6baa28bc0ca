use serde::Serialize;

use crate::error::InputError;

/// Readings per heartbeat window (MIT-BIH beats resampled to 187 points)
pub const SAMPLE_LEN: usize = 187;

/// Model input layout: batch, timesteps, channels
pub const TENSOR_SHAPE: [usize; 3] = [1, SAMPLE_LEN, 1];

/// One heartbeat waveform, exactly `SAMPLE_LEN` finite amplitude readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EcgSample {
    values: Vec<f32>,
}

impl EcgSample {
    /// Validate length and finiteness.
    ///
    /// Adapters check the count first so they can report their own
    /// wording; this is the last gate before the model sees the data.
    pub fn new(values: Vec<f32>) -> Result<Self, InputError> {
        if values.len() != SAMPLE_LEN {
            return Err(InputError::SampleLength {
                expected: SAMPLE_LEN,
                actual: values.len(),
            });
        }
        if let Some((index, value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFinite {
                index,
                value: *value,
            });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Shape the flat readings are reinterpreted as for inference.
    pub fn tensor_shape(&self) -> [usize; 3] {
        TENSOR_SHAPE
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

impl TryFrom<Vec<f32>> for EcgSample {
    type Error = InputError;

    fn try_from(values: Vec<f32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}
