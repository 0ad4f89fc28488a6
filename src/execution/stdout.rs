//! Stdout digest - structured logs from raw `dvc repro` output
//!
//! Executions recorded before the backend started emitting structured logs
//! only carry stdout. The digest recognizes the handful of line forms DVC
//! prints while reproducing a pipeline.

use serde::{Deserialize, Serialize};

use super::summary::{LogEntry, LogKind};

/// Stage lists and log entries recovered from stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdoutDigest {
    /// Stages that started running, in order.
    pub executed_stages: Vec<String>,
    /// Stages reported up to date.
    pub skipped_stages: Vec<String>,
    /// Stages named in an error line.
    pub failed_stages: Vec<String>,
    /// One entry per non-empty line.
    pub logs: Vec<LogEntry>,
}

impl StdoutDigest {
    /// Parse raw stdout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dvc_console::execution::{LogKind, StdoutDigest};
    ///
    /// let digest = StdoutDigest::parse(
    ///     "Stage 'prepare' is up to date\nRunning stage 'train':\nPipeline completed successfully.",
    /// );
    /// assert_eq!(digest.executed_stages, ["train"]);
    /// assert_eq!(digest.skipped_stages, ["prepare"]);
    /// assert_eq!(digest.logs[2].kind, LogKind::PipelineStatus);
    /// ```
    #[must_use]
    pub fn parse(stdout: &str) -> Self {
        let mut digest = Self::default();

        for line in stdout.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let kind = classify_line(line);
            match kind {
                LogKind::StageStart => push_stage(&mut digest.executed_stages, line),
                LogKind::StageSkipped => push_stage(&mut digest.skipped_stages, line),
                LogKind::Error => push_stage(&mut digest.failed_stages, line),
                LogKind::PipelineStatus | LogKind::Info => {}
            }
            digest.logs.push(LogEntry::new(kind, line));
        }

        digest
    }
}

fn classify_line(line: &str) -> LogKind {
    if line.starts_with("Running stage '") {
        LogKind::StageStart
    } else if line.starts_with("Stage '")
        && (line.contains("is up to date") || line.contains("didn't change, skipping"))
    {
        LogKind::StageSkipped
    } else if line.starts_with("ERROR") {
        LogKind::Error
    } else if line.starts_with("Pipeline completed successfully")
        || line.starts_with("Pipeline is up to date")
        || line.starts_with("Data and pipelines are up to date")
    {
        LogKind::PipelineStatus
    } else {
        LogKind::Info
    }
}

/// First single-quoted name in the line, pushed once.
fn push_stage(stages: &mut Vec<String>, line: &str) {
    let Some(name) = quoted(line) else {
        return;
    };
    if !stages.iter().any(|stage| stage == name) {
        stages.push(name.to_string());
    }
}

fn quoted(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once('\'')?;
    let (name, _) = rest.split_once('\'')?;
    Some(name).filter(|name| !name.is_empty())
}
