//! Experiment Table - display, comparison and filtering over records
//!
//! Holds one normalization pass in source order with an id index for
//! lookups. The table is rebuilt with every pass; it never merges records
//! across passes.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use super::experiment_record::ExperimentRecord;

/// Ordered, indexed set of experiment records.
///
/// ## Design
///
/// Records keep the normalizer's order (no sorting). The id index maps to
/// the first record with that id; ids are unique within one pass but the
/// table does not rely on it.
#[derive(Debug, Default, Clone)]
pub struct ExperimentTable {
    records: Vec<ExperimentRecord>,
    index: HashMap<String, usize>,
}

impl ExperimentTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from one normalization pass.
    #[must_use]
    pub fn from_records(records: Vec<ExperimentRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            index.entry(record.id().to_string()).or_insert(position);
        }
        Self { records, index }
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// All records in source order.
    #[must_use]
    pub fn records(&self) -> &[ExperimentRecord] {
        &self.records
    }

    /// Get a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ExperimentRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// The workspace record, if present.
    #[must_use]
    pub fn workspace(&self) -> Option<&ExperimentRecord> {
        self.records.iter().find(|record| record.is_workspace())
    }

    /// Committed experiments (everything but the workspace).
    pub fn committed(&self) -> impl Iterator<Item = &ExperimentRecord> {
        self.records.iter().filter(|record| !record.is_workspace())
    }

    /// Union of param keys, in first-seen order. Used as table columns.
    #[must_use]
    pub fn param_keys(&self) -> Vec<&str> {
        ordered_union(self.records.iter().map(|record| record.params().keys()))
    }

    /// Union of metric names, in first-seen order.
    #[must_use]
    pub fn metric_keys(&self) -> Vec<&str> {
        ordered_union(self.records.iter().map(|record| record.metrics().keys()))
    }

    /// Records whose param `key` equals `value`.
    #[must_use]
    pub fn filter_by_param(&self, key: &str, value: &Value) -> Vec<&ExperimentRecord> {
        self.records
            .iter()
            .filter(|record| record.param(key) == Some(value))
            .collect()
    }

    /// Compare two records side by side.
    ///
    /// Returns `None` if either id is unknown. Only differing keys are
    /// listed; a key present on one side only counts as differing.
    #[must_use]
    pub fn compare(&self, left_id: &str, right_id: &str) -> Option<Comparison> {
        let left = self.get(left_id)?;
        let right = self.get(right_id)?;

        let params = diff(
            left.params().iter(),
            right.params().iter(),
            |key| left.param(key),
            |key| right.param(key),
        );
        let metrics = diff(
            left.metrics().iter(),
            right.metrics().iter(),
            |key| left.metrics().get(key),
            |key| right.metrics().get(key),
        );

        Some(Comparison {
            left: left.id().to_string(),
            right: right.id().to_string(),
            params,
            metrics,
        })
    }
}

impl From<Vec<ExperimentRecord>> for ExperimentTable {
    fn from(records: Vec<ExperimentRecord>) -> Self {
        Self::from_records(records)
    }
}

/// One differing key in a [`Comparison`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference<T> {
    /// Dotted param key or metric name.
    pub key: String,
    /// Value on the left record, if present.
    pub left: Option<T>,
    /// Value on the right record, if present.
    pub right: Option<T>,
}

/// Differences between two experiment records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Left record id.
    pub left: String,
    /// Right record id.
    pub right: String,
    /// Differing params, left keys first then right-only keys.
    pub params: Vec<Difference<Value>>,
    /// Differing metrics, same ordering.
    pub metrics: Vec<Difference<Value>>,
}

impl Comparison {
    /// Whether the two records are identical in params and metrics.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.params.is_empty() && self.metrics.is_empty()
    }
}

fn ordered_union<'a, I, K>(groups: I) -> Vec<&'a str>
where
    I: Iterator<Item = K>,
    K: Iterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    groups
        .flatten()
        .map(String::as_str)
        .filter(|key| seen.insert(*key))
        .collect()
}

fn diff<'a, T, L, R>(
    left_entries: impl Iterator<Item = (&'a String, &'a T)>,
    right_entries: impl Iterator<Item = (&'a String, &'a T)>,
    left: L,
    right: R,
) -> Vec<Difference<T>>
where
    T: PartialEq + Clone + 'a,
    L: Fn(&str) -> Option<&'a T>,
    R: Fn(&str) -> Option<&'a T>,
{
    let mut differences = Vec::new();

    for (key, value) in left_entries {
        let other = right(key.as_str());
        if other != Some(value) {
            differences.push(Difference {
                key: key.clone(),
                left: Some(value.clone()),
                right: other.cloned(),
            });
        }
    }
    for (key, value) in right_entries {
        if left(key.as_str()).is_none() {
            differences.push(Difference {
                key: key.clone(),
                left: None,
                right: Some(value.clone()),
            });
        }
    }

    differences
}
