mod common;

use common::{constant_values, ventricular_values, write_dense_model};
use heartbeat::bootstrap::build_diagnosis;
use heartbeat::config::{AppConfig, ModelConfig, OutputKind};
use heartbeat::input::InputSource;
use heartbeat::{HeartbeatClass, HeartbeatError, SAMPLE_LEN};

fn model_config(dir: &std::path::Path) -> ModelConfig {
    AppConfig::for_model(write_dense_model(dir)).model
}

#[test]
fn csv_with_187_cells_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_diagnosis(&model_config(dir.path())).unwrap();

    // 11 rows x 17 columns
    let csv = constant_values(SAMPLE_LEN)
        .chunks(17)
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n");

    let prediction = service.diagnose_csv(csv.as_bytes()).unwrap();
    assert_eq!(prediction.class, HeartbeatClass::Normal);
    assert!((0.0..=100.0).contains(&prediction.confidence));

    let report = service.report(InputSource::Csv, &Ok(prediction));
    assert_eq!(
        report.lines(),
        vec!["Diagnosis: Normal (N)", "Confidence: 21.21%"]
    );
}

#[test]
fn csv_with_wrong_count_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_diagnosis(&model_config(dir.path())).unwrap();

    for n in [1, SAMPLE_LEN - 1, SAMPLE_LEN + 1, 2 * SAMPLE_LEN] {
        let csv = constant_values(n).join("\n");
        let result = service.diagnose_csv(csv.as_bytes());
        let report = service.report(InputSource::Csv, &result);
        assert_eq!(
            report.error_message(),
            Some("CSV must contain exactly 187 values.")
        );
    }

    let snapshot = service.metrics().snapshot();
    assert_eq!(snapshot.predictions_total(), 0);
    assert_eq!(snapshot.rejected_inputs, 4);
}

#[test]
fn csv_structure_errors_use_short_wording() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_diagnosis(&model_config(dir.path())).unwrap();

    let result = service.diagnose_csv(b"0.1,0.1\n0.1,0.1,0.1\n");
    assert_eq!(
        service.report(InputSource::Csv, &result).error_message(),
        Some("Error: Expected 2 fields in line 2, saw 3")
    );

    let result = service.diagnose_csv(b"");
    assert_eq!(
        service.report(InputSource::Csv, &result).error_message(),
        Some("Error: No columns to parse from file")
    );
}

#[test]
fn text_paths_match_expected_messages() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_diagnosis(&model_config(dir.path())).unwrap();

    let ok = service.diagnose_text(&constant_values(SAMPLE_LEN).join(","));
    assert_eq!(ok.unwrap().class, HeartbeatClass::Normal);

    for n in [SAMPLE_LEN - 1, SAMPLE_LEN + 1] {
        let result = service.diagnose_text(&constant_values(n).join(","));
        assert_eq!(
            service.report(InputSource::Text, &result).error_message(),
            Some("Please enter exactly 187 numbers.")
        );
    }

    let mut tokens = constant_values(SAMPLE_LEN);
    tokens[100] = "abc".to_string();
    let result = service.diagnose_text(&tokens.join(","));
    assert_eq!(
        service.report(InputSource::Text, &result).error_message(),
        Some("Invalid input: could not convert string to float: 'abc'")
    );

    assert_eq!(service.metrics().snapshot().predictions_total(), 1);
}

#[test]
fn tabs_and_newlines_equal_commas() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_diagnosis(&model_config(dir.path())).unwrap();

    let values: Vec<String> = ventricular_values().iter().map(|v| v.to_string()).collect();
    let by_comma = service.diagnose_text(&values.join(",")).unwrap();
    let by_tab = service.diagnose_text(&values.join("\t")).unwrap();
    let by_line = service.diagnose_text(&values.join("\n")).unwrap();

    assert_eq!(by_comma.class, HeartbeatClass::Ventricular);
    assert_eq!(by_comma, by_tab);
    assert_eq!(by_comma, by_line);
}

#[test]
fn repeated_predictions_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let service = build_diagnosis(&model_config(dir.path())).unwrap();

    let first = service.diagnose_values(ventricular_values()).unwrap();
    for _ in 0..10 {
        assert_eq!(service.diagnose_values(ventricular_values()).unwrap(), first);
    }
    assert_eq!(format!("{:.2}", first.confidence), "100.00");
}

#[test]
fn logits_mode_applies_softmax() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = model_config(dir.path());
    config.output = OutputKind::Logits;
    let service = build_diagnosis(&config).unwrap();

    // Softmax of an already-normalized vector flattens it but keeps the argmax.
    let prediction = service.diagnose_values(ventricular_values()).unwrap();
    assert_eq!(prediction.class, HeartbeatClass::Ventricular);
    assert!(prediction.confidence < 50.0);
}

#[test]
fn missing_model_fails_fast() {
    let config = AppConfig::for_model("no/such/model.json").model;
    let err = build_diagnosis(&config).err().unwrap();
    assert!(matches!(err, HeartbeatError::ModelLoad(_)));
}

#[test]
fn model_with_wrong_head_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("three_class.json");
    let model = serde_json::json!({
        "input_dim": SAMPLE_LEN,
        "layers": [{
            "weights": vec![vec![0.0; SAMPLE_LEN]; 3],
            "bias": [0.0, 0.0, 0.0],
            "activation": "softmax"
        }]
    });
    std::fs::write(&path, serde_json::to_vec(&model).unwrap()).unwrap();

    let err = build_diagnosis(&AppConfig::for_model(path).model).err().unwrap();
    assert!(err.to_string().contains("expected 5"));
}
