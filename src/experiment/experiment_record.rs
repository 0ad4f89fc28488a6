//! Experiment Record - canonical, display-ready experiment

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::params::flatten_params;
use super::raw_node::WORKSPACE_REV;
use crate::config::NormalizerConfig;

/// Creation time as reported by the backend.
///
/// DVC emits ISO-8601 text without an offset; some tools emit epoch
/// seconds. Both are kept verbatim and resolved on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Seconds since the Unix epoch.
    Epoch(i64),
    /// Textual timestamp.
    Text(String),
}

impl Timestamp {
    /// Read a timestamp from a JSON value; other types yield `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
                .map(Self::Epoch),
            Value::String(s) if !s.is_empty() => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Resolve to a UTC datetime. Offset-less text is read as UTC.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Epoch(secs) => Utc.timestamp_opt(*secs, 0).single(),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|naive| naive.and_utc())
                }),
        }
    }
}

/// Read-only view of one metric: a scalar, or per-split values
/// (`{"train": 0.9, "test": 0.8}`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue<'a> {
    /// Split name → value.
    Splits(&'a Map<String, Value>),
    /// Single value.
    Scalar(&'a Value),
}

impl<'a> MetricValue<'a> {
    /// View a raw metric value.
    #[must_use]
    pub const fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(splits) => Self::Splits(splits),
            other => Self::Scalar(other),
        }
    }

    /// Numeric value of a scalar metric.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Scalar(value) => value.as_f64(),
            Self::Splits(_) => None,
        }
    }

    /// Numeric value of one split.
    #[must_use]
    pub fn split(self, name: &str) -> Option<f64> {
        match self {
            Self::Splits(splits) => splits.get(name).and_then(Value::as_f64),
            Self::Scalar(_) => None,
        }
    }
}

/// Experiment Record is the canonical form of one experiment.
///
/// Records are rebuilt from scratch on every normalization; two records
/// describe the same experiment when their ids match (see
/// [`ExperimentRecord::same_experiment`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    id: String,
    name: String,
    timestamp: Option<Timestamp>,
    params: Map<String, Value>,
    metrics: Map<String, Value>,
    deps: Map<String, Value>,
    outs: Map<String, Value>,
}

impl ExperimentRecord {
    /// Create a record with only an id and name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ExperimentRecordBuilder::new(id, name).build()
    }

    /// Create a builder for constructing a record with optional fields.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ExperimentRecordBuilder {
        ExperimentRecordBuilder::new(id, name)
    }

    /// Build a record from a node's `data` object.
    ///
    /// Every missing or mistyped field degrades to an empty/absent value.
    ///
    /// # Arguments
    ///
    /// * `id` - Revision id (non-empty)
    /// * `name` - Display name; `None` falls back to `id`
    /// * `data` - The node's `data`; `None` or non-objects read as empty
    /// * `config` - File labels and scalar params policy
    #[must_use]
    pub fn from_data(
        id: &str,
        name: Option<&str>,
        data: Option<&Value>,
        config: &NormalizerConfig,
    ) -> Self {
        let data = data.filter(|data| data.is_object());
        let field = |key: &str| data.and_then(|data| data.get(key));

        let mut builder = Self::builder(id, name.unwrap_or(id));

        if let Some(timestamp) = field("timestamp").and_then(Timestamp::from_value) {
            builder = builder.timestamp(timestamp);
        }
        if let Some(params) = field("params") {
            builder = builder.params(flatten_params(
                params,
                config.params_file_label(),
                config.scalar_params_policy(),
            ));
        }
        if let Some(metrics) = field("metrics")
            .and_then(|metrics| metrics.get(config.metrics_file_label()))
            .and_then(|file| file.get("data"))
            .and_then(Value::as_object)
        {
            builder = builder.metrics(metrics.clone());
        }
        if let Some(deps) = field("deps").and_then(Value::as_object) {
            builder = builder.deps(deps.clone());
        }
        if let Some(outs) = field("outs").and_then(Value::as_object) {
            builder = builder.outs(outs.clone());
        }

        builder.build()
    }

    /// Get the revision id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw timestamp, if any.
    #[must_use]
    pub const fn timestamp(&self) -> Option<&Timestamp> {
        self.timestamp.as_ref()
    }

    /// Get the creation time, if the timestamp is present and parseable.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_ref().and_then(Timestamp::to_datetime)
    }

    /// Get the flattened params (`"section.key"` → value).
    #[must_use]
    pub const fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Get one param by dotted key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Get the metrics (name → scalar or split map).
    #[must_use]
    pub const fn metrics(&self) -> &Map<String, Value> {
        &self.metrics
    }

    /// Get one metric by name.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<MetricValue<'_>> {
        self.metrics.get(name).map(MetricValue::of)
    }

    /// Get the stage dependencies (uninterpreted).
    #[must_use]
    pub const fn deps(&self) -> &Map<String, Value> {
        &self.deps
    }

    /// Get the stage outputs (uninterpreted).
    #[must_use]
    pub const fn outs(&self) -> &Map<String, Value> {
        &self.outs
    }

    /// Whether this record is the uncommitted workspace.
    #[must_use]
    pub fn is_workspace(&self) -> bool {
        self.id == WORKSPACE_REV
    }

    /// Identity across normalization passes is by id only.
    #[must_use]
    pub fn same_experiment(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Builder for `ExperimentRecord`.
#[derive(Debug)]
pub struct ExperimentRecordBuilder {
    id: String,
    name: String,
    timestamp: Option<Timestamp>,
    params: Map<String, Value>,
    metrics: Map<String, Value>,
    deps: Map<String, Value>,
    outs: Map<String, Value>,
}

impl ExperimentRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            timestamp: None,
            params: Map::new(),
            metrics: Map::new(),
            deps: Map::new(),
            outs: Map::new(),
        }
    }

    /// Set the timestamp.
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Replace all params.
    #[must_use]
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// Add one param.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Replace all metrics.
    #[must_use]
    pub fn metrics(mut self, metrics: Map<String, Value>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Add one metric.
    #[must_use]
    pub fn metric(mut self, name: impl Into<String>, value: Value) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    /// Set the stage dependencies.
    #[must_use]
    pub fn deps(mut self, deps: Map<String, Value>) -> Self {
        self.deps = deps;
        self
    }

    /// Set the stage outputs.
    #[must_use]
    pub fn outs(mut self, outs: Map<String, Value>) -> Self {
        self.outs = outs;
        self
    }

    /// Build the `ExperimentRecord`.
    #[must_use]
    pub fn build(self) -> ExperimentRecord {
        ExperimentRecord {
            id: self.id,
            name: self.name,
            timestamp: self.timestamp,
            params: self.params,
            metrics: self.metrics,
            deps: self.deps,
            outs: self.outs,
        }
    }
}
