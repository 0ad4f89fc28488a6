//! Pipeline execution output normalization
//!
//! Parallel to the experiment normalizer and independent of it: reduces
//! the output document of one pipeline run to a fully defaulted
//! [`ExecutionSummary`].
//!
//! ## Usage
//!
//! ```rust
//! use dvc_console::execution::ExecutionSummary;
//! use serde_json::json;
//!
//! let summary = ExecutionSummary::from_output(Some(&json!({})));
//! assert_eq!(summary.stages_executed, 0);
//! assert!(summary.structured_logs.is_empty());
//! ```

mod detail;
mod stdout;
mod summary;

pub use detail::{ExecutionDetail, ExecutionStatus};
pub use stdout::StdoutDigest;
pub use summary::{normalize_execution_output, ExecutionSummary, LogEntry, LogKind};
