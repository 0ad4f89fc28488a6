//! Execution Detail - view model for one pipeline execution document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::summary::{read_strings, ExecutionSummary};
use crate::config::ExecutionConfig;

/// Lifecycle state of a pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Queued, not started.
    Pending,
    /// Currently executing.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
    /// Missing or unrecognized status.
    #[default]
    Unknown,
}

impl ExecutionStatus {
    /// Parse the backend's status label.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "pending" => Self::Pending,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }

    /// Whether the execution can no longer change.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Everything the execution view shows for one run.
///
/// The backend duplicates `output_files`, `models_produced` and
/// `parameters_used` at the top of the execution document. When
/// `execution_output.pipeline_stats` lacks them, the top-level copies fill
/// the summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDetail {
    /// Execution id (empty if absent).
    pub execution_id: String,
    /// Lifecycle state.
    pub status: ExecutionStatus,
    /// Start time as reported.
    pub start_time: Option<String>,
    /// Wall-clock duration in seconds.
    pub duration_secs: Option<f64>,
    /// Raw log lines.
    pub logs: Vec<String>,
    /// Normalized execution output.
    pub summary: ExecutionSummary,
}

impl ExecutionDetail {
    /// Read an execution document with the default config.
    #[must_use]
    pub fn from_execution(execution: &Value) -> Self {
        Self::from_execution_with(execution, ExecutionConfig::new())
    }

    /// Read an execution document.
    ///
    /// Non-object documents yield the all-default detail.
    #[must_use]
    pub fn from_execution_with(execution: &Value, config: ExecutionConfig) -> Self {
        let Some(document) = execution.as_object() else {
            return Self::default();
        };

        let output = document.get("execution_output");
        let mut summary = ExecutionSummary::from_output_with(output, config);

        let has_stat = |key: &str| {
            output
                .and_then(|output| output.get("pipeline_stats"))
                .and_then(|stats| stats.get(key))
                .is_some_and(Value::is_array)
        };
        if !has_stat("output_files") {
            summary.output_files = top_level_strings(document, "output_files");
        }
        if !has_stat("models_produced") {
            summary.models_produced = top_level_strings(document, "models_produced");
        }
        let has_parameters = output
            .and_then(|output| output.get("pipeline_stats"))
            .and_then(|stats| stats.get("parameters_used"))
            .is_some_and(Value::is_object);
        if !has_parameters {
            if let Some(parameters) = document.get("parameters_used").and_then(Value::as_object) {
                summary.parameters_used = parameters.clone();
            }
        }

        Self {
            execution_id: document
                .get("execution_id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            status: document
                .get("status")
                .and_then(Value::as_str)
                .map_or(ExecutionStatus::Unknown, ExecutionStatus::from_label),
            start_time: document
                .get("start_time")
                .and_then(Value::as_str)
                .map(str::to_string),
            duration_secs: document
                .get("duration")
                .and_then(Value::as_f64)
                .filter(|secs| secs.is_finite() && *secs >= 0.0),
            logs: top_level_strings(document, "logs"),
            summary,
        }
    }
}

fn top_level_strings(document: &Map<String, Value>, key: &str) -> Vec<String> {
    document.get(key).and_then(read_strings).unwrap_or_default()
}
