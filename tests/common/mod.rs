#![allow(dead_code)]

use heartbeat::api::AppState;
use heartbeat::bootstrap::build_app_state;
use heartbeat::config::AppConfig;
use heartbeat::SAMPLE_LEN;
use serde_json::json;
use std::path::{Path, PathBuf};

/// Single softmax layer where class `k` scores the readings at positions
/// `j % 5 == k`. Constant input ties classes 0 and 1 (38 positions each),
/// so it lands on Normal (N) at 21.21%.
pub fn write_dense_model(dir: &Path) -> PathBuf {
    let weights: Vec<Vec<f64>> = (0..5)
        .map(|k| {
            (0..SAMPLE_LEN)
                .map(|j| if j % 5 == k { 1.0 } else { 0.0 })
                .collect()
        })
        .collect();

    let model = json!({
        "input_dim": SAMPLE_LEN,
        "layers": [{
            "weights": weights,
            "bias": [0.0, 0.0, 0.0, 0.0, 0.0],
            "activation": "softmax"
        }],
        "metadata": { "name": "residue-fixture" }
    });

    let path = dir.join("fixture_model.json");
    std::fs::write(&path, serde_json::to_vec(&model).unwrap()).unwrap();
    path
}

pub fn app_state(dir: &Path) -> AppState {
    let model = write_dense_model(dir);
    build_app_state(&AppConfig::for_model(model)).unwrap()
}

/// `n` copies of 0.1
pub fn constant_values(n: usize) -> Vec<String> {
    vec!["0.1".to_string(); n]
}

/// Readings that only light up class 2 (Ventricular).
pub fn ventricular_values() -> Vec<f32> {
    (0..SAMPLE_LEN)
        .map(|j| if j % 5 == 2 { 1.0 } else { 0.0 })
        .collect()
}
