//! # dvc-console: experiment and execution normalization core
//!
//! **Version**: 0.1.0
//!
//! The MLOps console talks to a DVC-backed REST service whose experiment
//! history and pipeline execution payloads are deeply nested and loosely
//! shaped. This crate reduces them to canonical, display-ready records:
//!
//! - [`experiment`]: `dvc exp show --json` tree → ordered `ExperimentRecord`s
//! - [`execution`]: pipeline execution output → fully defaulted `ExecutionSummary`
//!
//! ## Design Principles
//!
//! - **Never fail visibly**: a partially empty view beats a crashed one.
//!   Bad payloads degrade to empty output; see [`Error`] for what the
//!   fallible entry points report.
//! - **Decode once**: each raw node is classified into a tagged variant
//!   before any field is read.
//! - **Pure**: no I/O, no shared state; repeated calls are idempotent.
//!
//! ## Example Usage
//!
//! ```rust
//! use dvc_console::experiment::normalize_experiments;
//! use serde_json::json;
//!
//! let payload = json!([
//!     {"rev": "workspace", "data": {"timestamp": 1}},
//!     {"rev": "abc123", "experiments": []}
//! ]);
//!
//! let records = normalize_experiments(&payload);
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].name(), "Current Workspace");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod execution;
pub mod experiment;
#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod wasm;

pub use config::{ExecutionConfig, NormalizerConfig, ScalarParams};
pub use error::{Error, Result};
