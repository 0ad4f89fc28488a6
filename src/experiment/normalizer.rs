//! Experiment List Normalizer - experiment-history payload to records
//!
//! Entry point for the experiment view. Classifies every node of the
//! `dvc exp show --json` array, builds one [`ExperimentRecord`] per
//! experiment, and applies the workspace-collapse rule.
//!
//! ## Failure model
//!
//! The view must render something, so [`ExperimentNormalizer::normalize`]
//! never fails:
//!
//! - payload text that is not JSON is logged at `warn` and yields `[]`
//! - a payload that is not an array yields `[]`
//! - unrecognized nodes are skipped (expected noise, logged at `trace`)
//! - missing nested fields default
//!
//! [`ExperimentNormalizer::try_normalize`] exposes the payload-level
//! failures instead.

use serde_json::Value;
use tracing::{debug, trace, warn};

use super::experiment_record::ExperimentRecord;
use super::raw_node::{RawNode, WORKSPACE_REV};
use crate::config::NormalizerConfig;
use crate::error::json_type_name;
use crate::{Error, Result};

/// Normalizer for experiment-history payloads.
///
/// Pure and stateless apart from its configuration: normalizing the same
/// payload twice yields equal results.
#[derive(Debug, Clone, Default)]
pub struct ExperimentNormalizer {
    config: NormalizerConfig,
}

impl ExperimentNormalizer {
    /// Create a normalizer with the DVC defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a custom configuration.
    #[must_use]
    pub const fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a payload, absorbing every failure.
    ///
    /// Accepts the node array itself or a string holding its JSON text.
    /// Any other top-level shape yields an empty list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dvc_console::experiment::ExperimentNormalizer;
    /// use serde_json::json;
    ///
    /// let payload = json!([
    ///     {"rev": "workspace", "data": {"timestamp": 1}},
    ///     {"rev": "abc123", "experiments": [
    ///         {"name": "exp1", "revs": [{"rev": "def456", "data": {}}]}
    ///     ]}
    /// ]);
    /// let records = ExperimentNormalizer::new().normalize(&payload);
    /// let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
    /// assert_eq!(ids, ["workspace", "def456"]);
    /// ```
    #[must_use]
    pub fn normalize(&self, payload: &Value) -> Vec<ExperimentRecord> {
        match self.try_normalize(payload) {
            Ok(records) => records,
            Err(err @ Error::Json(_)) => {
                warn!(error = %err, "experiment payload is not valid JSON; showing no experiments");
                Vec::new()
            }
            Err(err) => {
                debug!(error = %err, "experiment payload ignored");
                Vec::new()
            }
        }
    }

    /// Normalize payload text, absorbing every failure.
    #[must_use]
    pub fn normalize_str(&self, payload: &str) -> Vec<ExperimentRecord> {
        match serde_json::from_str::<Value>(payload) {
            Ok(value) => self.normalize_nodes_or_empty(&value),
            Err(err) => {
                warn!(error = %err, "experiment payload is not valid JSON; showing no experiments");
                Vec::new()
            }
        }
    }

    /// Normalize a payload, reporting payload-level failures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if a string payload is not valid JSON, and
    /// [`Error::UnexpectedShape`] if the (parsed) payload is not an array.
    pub fn try_normalize(&self, payload: &Value) -> Result<Vec<ExperimentRecord>> {
        match payload {
            Value::Array(nodes) => Ok(self.normalize_nodes(nodes)),
            Value::String(text) => {
                let parsed: Value = serde_json::from_str(text)?;
                match &parsed {
                    Value::Array(nodes) => Ok(self.normalize_nodes(nodes)),
                    other => Err(unexpected(other)),
                }
            }
            other => Err(unexpected(other)),
        }
    }

    fn normalize_nodes_or_empty(&self, value: &Value) -> Vec<ExperimentRecord> {
        value
            .as_array()
            .map(|nodes| self.normalize_nodes(nodes))
            .unwrap_or_default()
    }

    /// Normalize an already-decoded node array.
    #[must_use]
    pub fn normalize_nodes(&self, nodes: &[Value]) -> Vec<ExperimentRecord> {
        let mut records = Vec::new();

        for (index, node) in nodes.iter().enumerate() {
            match RawNode::classify(node) {
                RawNode::Group { rev, experiments } => {
                    trace!(index, rev, entries = experiments.len(), "group node");
                    records.extend(experiments.iter().filter_map(|entry| {
                        let id = entry.rev()?;
                        Some(ExperimentRecord::from_data(
                            id,
                            entry.display_name(),
                            entry.data(),
                            &self.config,
                        ))
                    }));
                }
                RawNode::Workspace { data } => {
                    records.push(ExperimentRecord::from_data(
                        WORKSPACE_REV,
                        Some(self.config.workspace_display_name()),
                        Some(data),
                        &self.config,
                    ));
                }
                RawNode::Direct { rev, data } => {
                    records.push(ExperimentRecord::from_data(rev, None, Some(data), &self.config));
                }
                RawNode::Unrecognized => {
                    trace!(index, "skipping unrecognized experiment node");
                }
            }
        }

        collapse_workspace(records)
    }
}

/// Workspace-collapse rule.
///
/// When no committed experiment exists, only the workspace record(s) are
/// meaningful; otherwise the workspace stays alongside the experiments.
/// The check is global and does not de-duplicate workspace records.
fn collapse_workspace(records: Vec<ExperimentRecord>) -> Vec<ExperimentRecord> {
    if records.iter().any(|record| !record.is_workspace()) {
        return records;
    }
    records
        .into_iter()
        .filter(ExperimentRecord::is_workspace)
        .collect()
}

fn unexpected(found: &Value) -> Error {
    Error::UnexpectedShape {
        expected: "array",
        found: json_type_name(found),
    }
}

/// Normalize a payload with the default configuration.
///
/// Shorthand for `ExperimentNormalizer::new().normalize(payload)`.
#[must_use]
pub fn normalize_experiments(payload: &Value) -> Vec<ExperimentRecord> {
    ExperimentNormalizer::new().normalize(payload)
}
