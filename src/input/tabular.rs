//! CSV upload adapter.
//!
//! The file has no header and any row/column layout; cells are flattened
//! row-major. The first record fixes the width, shorter records are padded
//! with missing cells and longer ones are rejected.

use csv::{ByteRecord, ReaderBuilder};
use tracing::debug;

use crate::domain::{EcgSample, SAMPLE_LEN};
use crate::error::{InputError, Result};

/// Parse an uploaded CSV into a sample.
///
/// The count is checked before any cell is converted, so a file with the
/// wrong number of cells always reports the length error.
pub fn parse_csv(bytes: &[u8]) -> Result<EcgSample> {
    let cells = flatten_cells(bytes)?;

    if cells.len() != SAMPLE_LEN {
        debug!(cells = cells.len(), "csv upload rejected: wrong cell count");
        return Err(InputError::CsvLength {
            expected: SAMPLE_LEN,
            actual: cells.len(),
        }
        .into());
    }

    let values = cells
        .iter()
        .map(|cell| parse_cell(cell.as_deref()))
        .collect::<std::result::Result<Vec<f32>, InputError>>()?;

    Ok(EcgSample::new(values)?)
}

/// Row-major cells; `None` marks a cell missing from a short row or left empty.
fn flatten_cells(bytes: &[u8]) -> Result<Vec<Option<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut width: Option<usize> = None;
    let mut cells = Vec::with_capacity(SAMPLE_LEN);
    let mut record = ByteRecord::new();
    let mut row: u64 = 0;

    while reader.read_byte_record(&mut record)? {
        row += 1;
        let expected = *width.get_or_insert(record.len());
        if record.len() > expected {
            let line = record.position().map(|p| p.line()).unwrap_or(row);
            return Err(InputError::RaggedRow {
                line,
                expected,
                actual: record.len(),
            }
            .into());
        }

        for field in record.iter() {
            let text = String::from_utf8_lossy(field);
            let text = text.trim();
            cells.push(if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            });
        }
        cells.extend(std::iter::repeat(None).take(expected - record.len()));
    }

    if width.is_none() {
        return Err(InputError::EmptyFile.into());
    }

    Ok(cells)
}

fn parse_cell(cell: Option<&str>) -> std::result::Result<f32, InputError> {
    match cell {
        // Missing cells read as NaN and are caught by the finiteness gate.
        None => Ok(f32::NAN),
        Some(text) => text.parse::<f32>().map_err(|_| InputError::NotANumber {
            token: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeartbeatError;

    fn csv_with(rows: usize, cols: usize) -> String {
        (0..rows)
            .map(|r| {
                (0..cols)
                    .map(|c| format!("{:.3}", (r * cols + c) as f32 / 1000.0))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn input_error(err: HeartbeatError) -> InputError {
        match err {
            HeartbeatError::Input(e) => e,
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_row_of_187() {
        let sample = parse_csv(csv_with(1, SAMPLE_LEN).as_bytes()).unwrap();
        assert_eq!(sample.len(), SAMPLE_LEN);
        assert!((sample.values()[186] - 0.186).abs() < 1e-6);
    }

    #[test]
    fn test_single_column_of_187() {
        let sample = parse_csv(csv_with(SAMPLE_LEN, 1).as_bytes()).unwrap();
        assert!((sample.values()[1] - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_flattens_row_major() {
        // 11 x 17 = 187
        let sample = parse_csv(csv_with(11, 17).as_bytes()).unwrap();
        for (i, v) in sample.values().iter().enumerate() {
            assert!((v - i as f32 / 1000.0).abs() < 1e-6, "cell {i} out of order");
        }
    }

    #[test]
    fn test_wrong_count_reports_length_error() {
        for cols in [186, 188, 1] {
            let err = input_error(parse_csv(csv_with(1, cols).as_bytes()).unwrap_err());
            assert_eq!(err.to_string(), "CSV must contain exactly 187 values.");
        }
    }

    #[test]
    fn test_length_checked_before_parsing() {
        let err = input_error(parse_csv(b"abc,def\n").unwrap_err());
        assert!(matches!(err, InputError::CsvLength { actual: 2, .. }));
    }

    #[test]
    fn test_non_numeric_cell() {
        let mut cells: Vec<String> = (0..SAMPLE_LEN).map(|_| "0.5".to_string()).collect();
        cells[40] = "abc".to_string();
        let err = input_error(parse_csv(cells.join(",").as_bytes()).unwrap_err());
        assert_eq!(
            err,
            InputError::NotANumber {
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_short_rows_are_padded_with_missing_cells() {
        // 94 + 93 raw cells, but the short row pads to 94: 188 in total.
        let data = format!("{}\n{}", csv_with(1, 94), csv_with(1, 93));
        let err = input_error(parse_csv(data.as_bytes()).unwrap_err());
        assert!(matches!(err, InputError::CsvLength { actual: 188, .. }));
    }

    #[test]
    fn test_padded_cell_is_rejected_as_non_finite() {
        // 17 columns x 11 rows with the last row one cell short.
        let mut data = csv_with(11, 17);
        let cut = data.rfind(',').unwrap();
        data.truncate(cut);
        let err = input_error(parse_csv(data.as_bytes()).unwrap_err());
        assert!(matches!(err, InputError::NonFinite { index: 186, .. }));
    }

    #[test]
    fn test_longer_row_is_rejected() {
        let data = format!("{}\n{}", csv_with(1, 2), csv_with(1, 3));
        let err = input_error(parse_csv(data.as_bytes()).unwrap_err());
        assert_eq!(
            err,
            InputError::RaggedRow {
                line: 2,
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_empty_file() {
        let err = input_error(parse_csv(b"").unwrap_err());
        assert_eq!(err, InputError::EmptyFile);
    }

    #[test]
    fn test_blank_lines_and_whitespace_are_ignored() {
        let data = format!("\n{}\n\n", csv_with(1, SAMPLE_LEN).replace(',', " , "));
        assert!(parse_csv(data.as_bytes()).is_ok());
    }
}
