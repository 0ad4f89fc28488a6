//! Execution Summary - pipeline execution output, fully defaulted
//!
//! The backend stores one `execution_output` document per pipeline run:
//!
//! ```text
//! {
//!   "summary":        {"stages_executed", "stages_skipped", "stages_failed"},
//!   "pipeline_stats": {"executed_stages", "skipped_stages", "failed_stages",
//!                      "output_files", "models_produced", "parameters_used"},
//!   "structured_logs": [{"type", "message", "timestamp"}],
//!   "stdout", "stderr"
//! }
//! ```
//!
//! Any part may be missing (the run may not have produced output yet).
//! [`ExecutionSummary`] has every field present so the view never
//! special-cases "missing".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::stdout::StdoutDigest;
use crate::config::ExecutionConfig;
use crate::experiment::Timestamp;

/// Kind of a structured log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// A stage started running.
    StageStart,
    /// A stage was up to date and skipped.
    StageSkipped,
    /// An error was reported.
    Error,
    /// Overall pipeline status line.
    PipelineStatus,
    /// Anything else.
    #[default]
    Info,
}

impl LogKind {
    /// Parse the backend's `type` label; unknown labels are `Info`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "stage_start" => Self::StageStart,
            "stage_skipped" => Self::StageSkipped,
            "error" => Self::Error,
            "pipeline_status" => Self::PipelineStatus,
            _ => Self::Info,
        }
    }

    /// The backend's label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StageStart => "stage_start",
            Self::StageSkipped => "stage_skipped",
            Self::Error => "error",
            Self::PipelineStatus => "pipeline_status",
            Self::Info => "info",
        }
    }
}

/// One structured log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Entry kind.
    pub kind: LogKind,
    /// Log message (empty if absent).
    pub message: String,
    /// Time the entry was logged, if known.
    pub timestamp: Option<String>,
}

impl LogEntry {
    /// Create an entry without a timestamp.
    #[must_use]
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: None,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let text = |key: &str| entry.get(key).and_then(Value::as_str);
        Some(Self {
            kind: text("type").map_or(LogKind::Info, LogKind::from_label),
            message: text("message").unwrap_or_default().to_string(),
            timestamp: entry
                .get("timestamp")
                .and_then(Timestamp::from_value)
                .map(|timestamp| match timestamp {
                    Timestamp::Text(text) => text,
                    Timestamp::Epoch(secs) => secs.to_string(),
                }),
        })
    }
}

/// Normalized pipeline execution output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSummary {
    /// Number of stages that ran.
    pub stages_executed: u64,
    /// Number of stages skipped as up to date.
    pub stages_skipped: u64,
    /// Number of stages that failed.
    pub stages_failed: u64,
    /// Names of stages that ran, in order.
    pub executed_stages: Vec<String>,
    /// Names of skipped stages, in order.
    pub skipped_stages: Vec<String>,
    /// Names of failed stages, in order.
    pub failed_stages: Vec<String>,
    /// Paths of files the run wrote.
    pub output_files: Vec<String>,
    /// Paths of model artifacts the run produced.
    pub models_produced: Vec<String>,
    /// Parameters the run used (flat).
    pub parameters_used: Map<String, Value>,
    /// Structured log, append-only, in order.
    pub structured_logs: Vec<LogEntry>,
    /// Raw standard output.
    pub stdout: String,
    /// Raw standard error.
    pub stderr: String,
}

impl ExecutionSummary {
    /// Normalize an execution output payload with the default config.
    ///
    /// `None`, `null` and non-object payloads yield the all-default summary.
    #[must_use]
    pub fn from_output(output: Option<&Value>) -> Self {
        Self::from_output_with(output, ExecutionConfig::new())
    }

    /// Normalize an execution output payload.
    ///
    /// Every nested access is independently optional: a payload may carry
    /// `summary` without `pipeline_stats` or the other way around.
    #[must_use]
    pub fn from_output_with(output: Option<&Value>, config: ExecutionConfig) -> Self {
        let Some(output) = output.filter(|output| output.is_object()) else {
            return Self::default();
        };

        let summary = output.get("summary");
        let stats = output.get("pipeline_stats");
        let count = |key: &str| summary.and_then(|summary| summary.get(key)).and_then(read_count);
        let list = |key: &str| stats.and_then(|stats| stats.get(key)).and_then(read_strings);
        let logs = output.get("structured_logs").and_then(Value::as_array);

        let executed = count("stages_executed");
        let skipped = count("stages_skipped");
        let failed = count("stages_failed");
        let executed_stages = list("executed_stages");
        let skipped_stages = list("skipped_stages");
        let failed_stages = list("failed_stages");

        let present = Present {
            executed: executed.is_some(),
            skipped: skipped.is_some(),
            failed: failed.is_some(),
            executed_stages: executed_stages.is_some(),
            skipped_stages: skipped_stages.is_some(),
            failed_stages: failed_stages.is_some(),
            logs: logs.is_some(),
        };

        let mut normalized = Self {
            stages_executed: executed.unwrap_or_default(),
            stages_skipped: skipped.unwrap_or_default(),
            stages_failed: failed.unwrap_or_default(),
            executed_stages: executed_stages.unwrap_or_default(),
            skipped_stages: skipped_stages.unwrap_or_default(),
            failed_stages: failed_stages.unwrap_or_default(),
            output_files: list("output_files").unwrap_or_default(),
            models_produced: list("models_produced").unwrap_or_default(),
            parameters_used: stats
                .and_then(|stats| stats.get("parameters_used"))
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            structured_logs: logs
                .map(|logs| logs.iter().filter_map(LogEntry::from_value).collect())
                .unwrap_or_default(),
            stdout: text(output.get("stdout")),
            stderr: text(output.get("stderr")),
        };

        if config.derives_from_stdout() && !normalized.stdout.is_empty() {
            let digest = StdoutDigest::parse(&normalized.stdout);
            normalized.fill_from_digest(digest, &present);
        }

        normalized
    }

    /// Total stages the run touched.
    #[must_use]
    pub const fn total_stages(&self) -> u64 {
        self.stages_executed
            .saturating_add(self.stages_skipped)
            .saturating_add(self.stages_failed)
    }

    /// Whether any stage failed or an error was logged.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.stages_failed > 0 || self.structured_logs.iter().any(|log| log.kind == LogKind::Error)
    }

    fn fill_from_digest(&mut self, digest: StdoutDigest, present: &Present) {
        let len = |stages: &Vec<String>| stages.len() as u64;
        if !present.executed {
            self.stages_executed = len(&digest.executed_stages);
        }
        if !present.skipped {
            self.stages_skipped = len(&digest.skipped_stages);
        }
        if !present.failed {
            self.stages_failed = len(&digest.failed_stages);
        }
        if !present.executed_stages {
            self.executed_stages = digest.executed_stages;
        }
        if !present.skipped_stages {
            self.skipped_stages = digest.skipped_stages;
        }
        if !present.failed_stages {
            self.failed_stages = digest.failed_stages;
        }
        if !present.logs {
            self.structured_logs = digest.logs;
        }
    }
}

/// Which fields the payload supplied itself.
struct Present {
    executed: bool,
    skipped: bool,
    failed: bool,
    executed_stages: bool,
    skipped_stages: bool,
    failed_stages: bool,
    logs: bool,
}

/// Normalize an execution output payload with the default config.
///
/// Shorthand for [`ExecutionSummary::from_output`].
#[must_use]
pub fn normalize_execution_output(output: Option<&Value>) -> ExecutionSummary {
    ExecutionSummary::from_output(output)
}

/// Non-negative integer, integral float, or numeric string.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn read_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String elements of an array; other elements are skipped.
pub(crate) fn read_strings(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect()
    })
}

fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}
