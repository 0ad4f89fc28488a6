//! Property-based tests for dvc-console
//!
//! Following the crate's pattern:
//! - Test invariants, not examples
//! - Feed randomly-shaped JSON (wrong types at every level)
//! - Run with ProptestConfig::with_cases(256)

use dvc_console::config::ScalarParams;
use dvc_console::execution::ExecutionSummary;
use dvc_console::experiment::{flatten_params, ExperimentNormalizer, ExperimentRecord};
use proptest::prelude::*;
use quickcheck::quickcheck;
use serde_json::{json, Map, Value};

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Keys drawn mostly from the field names the normalizers look for, so
/// random trees actually reach the nested branches.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("rev".to_string()),
        Just("data".to_string()),
        Just("experiments".to_string()),
        Just("revs".to_string()),
        Just("name".to_string()),
        Just("params".to_string()),
        Just("params.yaml".to_string()),
        Just("metrics".to_string()),
        Just("eval/metrics.json".to_string()),
        Just("timestamp".to_string()),
        Just("summary".to_string()),
        Just("pipeline_stats".to_string()),
        Just("structured_logs".to_string()),
        Just("stages_executed".to_string()),
        Just("executed_stages".to_string()),
        Just("type".to_string()),
        Just("stdout".to_string()),
        "[a-z]{1,6}",
    ]
}

/// Arbitrary JSON, biased toward the backend's vocabulary.
fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        Just(json!("workspace")),
        "[a-z0-9 ']{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(5, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn is_well_typed(records: &[ExperimentRecord]) -> bool {
    records.iter().all(|record| !record.id().is_empty() && !record.name().is_empty())
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: arbitrary payloads never panic and every record has an id
    #[test]
    fn prop_experiment_normalizer_total(payload in arb_json()) {
        let records = ExperimentNormalizer::new().normalize(&payload);
        prop_assert!(is_well_typed(&records));
    }

    /// Property: nodes wrapped in an array never panic either
    #[test]
    fn prop_experiment_normalizer_total_on_arrays(nodes in prop::collection::vec(arb_json(), 0..8)) {
        let records = ExperimentNormalizer::new().normalize(&Value::Array(nodes));
        prop_assert!(is_well_typed(&records));
    }

    /// Property: normalizing twice yields equal results
    #[test]
    fn prop_experiment_normalizer_idempotent(nodes in prop::collection::vec(arb_json(), 0..8)) {
        let payload = Value::Array(nodes);
        let normalizer = ExperimentNormalizer::new();
        prop_assert_eq!(normalizer.normalize(&payload), normalizer.normalize(&payload));
    }

    /// Property: the string form of a payload normalizes like the payload
    #[test]
    fn prop_string_payload_equivalent(nodes in prop::collection::vec(arb_json(), 0..8)) {
        let payload = Value::Array(nodes);
        let text = Value::String(payload.to_string());
        let normalizer = ExperimentNormalizer::new();
        prop_assert_eq!(normalizer.normalize(&text), normalizer.normalize(&payload));
    }

    /// Property: direct and workspace nodes map one-to-one, in source order
    #[test]
    fn prop_workspace_collapse(revs in prop::collection::vec(prop_oneof![Just("workspace".to_string()), "[a-f0-9]{6}"], 0..8)) {
        let nodes: Vec<Value> = revs.iter().map(|rev| json!({"rev": rev, "data": {}})).collect();
        let records = ExperimentNormalizer::new().normalize(&Value::Array(nodes));
        let ids: Vec<&str> = records.iter().map(ExperimentRecord::id).collect();
        let expected: Vec<&str> = revs.iter().map(String::as_str).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Property: flattened keys are always dotted
    #[test]
    fn prop_flatten_params_dotted(params in arb_json()) {
        let flat = flatten_params(&params, "params.yaml", &ScalarParams::Drop);
        for key in flat.keys() {
            prop_assert!(key.contains('.'));
        }
    }

    /// Property: the execution normalizer never panics and counters stay sane
    #[test]
    fn prop_execution_summary_total(payload in arb_json()) {
        let summary = ExecutionSummary::from_output(Some(&payload));
        prop_assert!(summary.total_stages() >= summary.stages_executed);
        let again = ExecutionSummary::from_output(Some(&payload));
        prop_assert_eq!(summary, again);
    }
}

// ============================================================================
// QuickCheck: raw text payloads
// ============================================================================

quickcheck! {
    /// Arbitrary text never panics the string entry point.
    fn qc_normalize_str_total(text: String) -> bool {
        let normalizer = ExperimentNormalizer::new();
        is_well_typed(&normalizer.normalize_str(&text))
    }

    /// Arbitrary text as stdout never panics the digest.
    fn qc_stdout_digest_total(text: String) -> bool {
        let output = json!({"stdout": text.as_str()});
        let config = dvc_console::ExecutionConfig::new().derive_from_stdout(true);
        let summary = ExecutionSummary::from_output_with(Some(&output), config);
        summary.structured_logs.len() <= text.lines().count()
    }
}
