//! Tests for normalizer configuration

use dvc_console::experiment::ExperimentNormalizer;
use dvc_console::{Error, ExecutionConfig, NormalizerConfig, ScalarParams};

#[test]
fn test_config_builder_chain() {
    let config = NormalizerConfig::new()
        .params_file("conf/params.yaml")
        .metrics_file("reports/metrics.json")
        .workspace_label("Working copy")
        .scalar_params(ScalarParams::reserved("_top"));

    assert_eq!(config.params_file_label(), "conf/params.yaml");
    assert_eq!(config.metrics_file_label(), "reports/metrics.json");
    assert_eq!(config.workspace_display_name(), "Working copy");
    assert_eq!(config.scalar_params_policy(), &ScalarParams::reserved("_top"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_round_trips_through_json() {
    let config = NormalizerConfig::new().scalar_params(ScalarParams::reserved("_root"));
    let text = serde_json::to_string(&config).expect("serializable");
    assert_eq!(NormalizerConfig::from_json_str(&text).expect("valid"), config);
}

#[test]
fn test_empty_document_is_default() {
    assert_eq!(
        NormalizerConfig::from_json_str("{}").expect("valid"),
        NormalizerConfig::default()
    );
    assert_eq!(
        ExecutionConfig::from_json_str("{}").expect("valid"),
        ExecutionConfig::default()
    );
}

#[test]
fn test_invalid_documents() {
    assert!(matches!(
        NormalizerConfig::from_json_str("not json"),
        Err(Error::Json(_))
    ));
    assert!(matches!(
        NormalizerConfig::from_json_str(r#"{"scalar_params": {"reserved": ""}}"#),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        ExecutionConfig::from_json_str(r#"{"derive_from_stdout": "yes"}"#),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_execution_config() {
    let config = ExecutionConfig::from_json_str(r#"{"derive_from_stdout": true}"#).expect("valid");
    assert!(config.derives_from_stdout());
    assert!(!ExecutionConfig::new().derives_from_stdout());
}

#[test]
fn test_normalizer_exposes_config() {
    let config = NormalizerConfig::new().workspace_label("WS");
    let normalizer = ExperimentNormalizer::with_config(config.clone());
    assert_eq!(normalizer.config(), &config);
}
