//! Experiment history normalization
//!
//! Turns the nested `dvc exp show --json` tree into a flat, ordered list
//! of display-ready records.
//!
//! ## Pipeline
//!
//! ```text
//! payload ──> RawNode::classify ──> ExperimentRecord::from_data ──> Vec<ExperimentRecord>
//!                 (per node)          └─ flatten_params                   │
//!                                                                   workspace collapse
//!                                                                         │
//!                                                                  ExperimentTable
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use dvc_console::experiment::{normalize_experiments, ExperimentTable};
//! use serde_json::json;
//!
//! let payload = json!([{"rev": "abc123", "data": {
//!     "params": {"params.yaml": {"data": {"train": {"lr": 0.01}}}}
//! }}]);
//!
//! let table = ExperimentTable::from_records(normalize_experiments(&payload));
//! assert_eq!(table.param_keys(), ["train.lr"]);
//! ```

mod experiment_record;
mod normalizer;
mod params;
mod raw_node;
mod store;

pub use experiment_record::{ExperimentRecord, ExperimentRecordBuilder, MetricValue, Timestamp};
pub use normalizer::{normalize_experiments, ExperimentNormalizer};
pub use params::flatten_params;
pub use raw_node::{ExperimentEntry, NodeShape, RawNode, RevEntry, WORKSPACE_REV};
pub use store::{Comparison, Difference, ExperimentTable};
