//! Tests for error types

use dvc_console::experiment::ExperimentNormalizer;
use dvc_console::{Error, NormalizerConfig};
use serde_json::json;

#[test]
fn test_json_error() {
    let error = ExperimentNormalizer::new()
        .try_normalize(&json!("[{"))
        .unwrap_err();
    let error_str = format!("{error}");
    assert!(matches!(error, Error::Json(_)));
    assert!(error_str.contains("JSON parse error"));
}

#[test]
fn test_unexpected_shape_error() {
    let error = Error::UnexpectedShape {
        expected: "array",
        found: "object",
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Unexpected payload shape"));
    assert!(error_str.contains("expected array"));
    assert!(error_str.contains("found object"));
}

#[test]
fn test_unexpected_shape_names_payload_type() {
    let normalizer = ExperimentNormalizer::new();
    for (payload, found) in [
        (json!(null), "null"),
        (json!(true), "boolean"),
        (json!(1.5), "number"),
        (json!({}), "object"),
    ] {
        let error = normalizer.try_normalize(&payload).unwrap_err();
        assert!(
            matches!(error, Error::UnexpectedShape { found: f, .. } if f == found),
            "{payload}"
        );
    }
}

#[test]
fn test_config_error() {
    let error = NormalizerConfig::from_json_str(r#"{"metrics_file": ""}"#).unwrap_err();
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid configuration"));
    assert!(error_str.contains("metrics_file"));
}

#[test]
fn test_error_debug() {
    let error = Error::Config("test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("Config"));
}

#[test]
fn test_error_from_serde_json() {
    let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = serde_error.into();
    assert!(matches!(error, Error::Json(_)));
}
