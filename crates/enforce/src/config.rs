//! Per-function enforcement configuration
//!
//! Validator-level settings (`exhaust_sequences`) live on the validators
//! themselves. This module holds what applies to a whole enforced function.
//!
//! ```
//! use enforce::config::{EnforceConfig, FailureMode};
//!
//! let config: EnforceConfig = serde_json::from_str(r#"{"failure_mode": "collect_all"}"#).unwrap();
//! assert_eq!(config.failure_mode, FailureMode::CollectAll);
//! ```

use serde::{Deserialize, Serialize};

/// How failures across independent parameters are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Stop at the first parameter that fails.
    #[default]
    FailFast,
    /// Validate every parameter and report all content failures together.
    ///
    /// Rules for a single parameter still short-circuit, and type
    /// incompatibilities still fail immediately.
    CollectAll,
}

/// Settings shared by every call of one enforced function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnforceConfig {
    pub failure_mode: FailureMode,
}

impl EnforceConfig {
    pub const fn new() -> Self {
        Self {
            failure_mode: FailureMode::FailFast,
        }
    }

    pub const fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    pub const fn collects_all(&self) -> bool {
        matches!(self.failure_mode, FailureMode::CollectAll)
    }
}
