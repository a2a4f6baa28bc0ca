//! Pasted-text adapter: numbers separated by commas, tabs or newlines.

use crate::domain::{EcgSample, SAMPLE_LEN};
use crate::error::InputError;

/// Parse free-form pasted text into a sample.
///
/// Every token must parse before the count is checked, so a stray word
/// reports as invalid input even when the count is also wrong.
pub fn parse_text(input: &str) -> Result<EcgSample, InputError> {
    let values = input
        .trim()
        .split([',', '\t', '\n'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f32>().map_err(|_| InputError::NotANumber {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<f32>, InputError>>()?;

    if values.len() != SAMPLE_LEN {
        return Err(InputError::TextLength {
            expected: SAMPLE_LEN,
            actual: values.len(),
        });
    }

    EcgSample::new(values)
}
