//! Normalizer configuration
//!
//! The DVC backend names its params and metrics files by convention
//! (`params.yaml`, `eval/metrics.json`). Projects that move them can point
//! the normalizer elsewhere without code changes.
//!
//! # Example
//!
//! ```rust
//! use dvc_console::config::{NormalizerConfig, ScalarParams};
//!
//! let config = NormalizerConfig::new()
//!     .params_file("conf/params.yaml")
//!     .scalar_params(ScalarParams::reserved("_root"));
//! assert_eq!(config.params_file_label(), "conf/params.yaml");
//! ```

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default params file label inside `data.params`.
pub const DEFAULT_PARAMS_FILE: &str = "params.yaml";

/// Default metrics file label inside `data.metrics`.
pub const DEFAULT_METRICS_FILE: &str = "eval/metrics.json";

/// Default display name for the uncommitted workspace record.
pub const DEFAULT_WORKSPACE_LABEL: &str = "Current Workspace";

/// What to do with parameters that sit directly at the top of the params
/// file instead of inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScalarParams {
    /// Drop them. Top-level scalars are not experiment differentiators in
    /// DVC projects.
    #[default]
    Drop,
    /// Keep them under a reserved section name (`"<section>.<key>"`).
    Reserved(String),
}

impl ScalarParams {
    /// Keep top-level scalars under `section`.
    #[must_use]
    pub fn reserved(section: impl Into<String>) -> Self {
        Self::Reserved(section.into())
    }
}

/// Configuration for the experiment list normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    params_file: String,
    metrics_file: String,
    workspace_label: String,
    scalar_params: ScalarParams,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizerConfig {
    /// Create a configuration with the DVC defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params_file: DEFAULT_PARAMS_FILE.to_string(),
            metrics_file: DEFAULT_METRICS_FILE.to_string(),
            workspace_label: DEFAULT_WORKSPACE_LABEL.to_string(),
            scalar_params: ScalarParams::Drop,
        }
    }

    /// Load a configuration from JSON text; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a valid config document,
    /// or [`Error::Config`] if a file label is empty.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants `from_json_str` enforces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first empty label.
    pub fn validate(&self) -> Result<()> {
        if self.params_file.trim().is_empty() {
            return Err(Error::Config("params_file must not be empty".to_string()));
        }
        if self.metrics_file.trim().is_empty() {
            return Err(Error::Config("metrics_file must not be empty".to_string()));
        }
        if let ScalarParams::Reserved(section) = &self.scalar_params {
            if section.is_empty() {
                return Err(Error::Config(
                    "reserved scalar params section must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Set the params file label.
    #[must_use]
    pub fn params_file(mut self, label: impl Into<String>) -> Self {
        self.params_file = label.into();
        self
    }

    /// Set the metrics file label.
    #[must_use]
    pub fn metrics_file(mut self, label: impl Into<String>) -> Self {
        self.metrics_file = label.into();
        self
    }

    /// Set the workspace record's display name.
    #[must_use]
    pub fn workspace_label(mut self, label: impl Into<String>) -> Self {
        self.workspace_label = label.into();
        self
    }

    /// Set the policy for top-level scalar params.
    #[must_use]
    pub fn scalar_params(mut self, policy: ScalarParams) -> Self {
        self.scalar_params = policy;
        self
    }

    /// Params file label.
    #[must_use]
    pub fn params_file_label(&self) -> &str {
        &self.params_file
    }

    /// Metrics file label.
    #[must_use]
    pub fn metrics_file_label(&self) -> &str {
        &self.metrics_file
    }

    /// Workspace display name.
    #[must_use]
    pub fn workspace_display_name(&self) -> &str {
        &self.workspace_label
    }

    /// Scalar params policy.
    #[must_use]
    pub const fn scalar_params_policy(&self) -> &ScalarParams {
        &self.scalar_params
    }
}

/// Configuration for the execution summary normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExecutionConfig {
    derive_from_stdout: bool,
}

impl ExecutionConfig {
    /// Create a configuration with defaults (stdout is not parsed).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            derive_from_stdout: false,
        }
    }

    /// Load a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a valid config document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Fill stage lists, counters and logs the payload left out from its
    /// raw stdout.
    #[must_use]
    pub const fn derive_from_stdout(mut self, enabled: bool) -> Self {
        self.derive_from_stdout = enabled;
        self
    }

    /// Whether stdout is parsed for missing fields.
    #[must_use]
    pub const fn derives_from_stdout(&self) -> bool {
        self.derive_from_stdout
    }
}
