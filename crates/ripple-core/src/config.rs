//! Pipeline configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// When set, the sequential guard reports every event it discards for
    /// violating the single-terminal contract. Reports go through `tracing`
    /// (the feature must be enabled for them to go anywhere).
    pub strict_contract_checks: bool,

    /// Pre-sizing hint for the trampoline scheduler's task queue.
    pub trampoline_queue_hint: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strict_contract_checks: false,
            trampoline_queue_hint: 16,
        }
    }
}

impl PipelineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `RIPPLE_STRICT`: enable strict contract checks ("1" or "true")
    /// - `RIPPLE_TRAMPOLINE_QUEUE_HINT`: trampoline queue pre-size
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("RIPPLE_STRICT") {
            cfg.strict_contract_checks = matches!(s.trim(), "1" | "true" | "TRUE");
        }

        if let Ok(s) = std::env::var("RIPPLE_TRAMPOLINE_QUEUE_HINT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.trampoline_queue_hint = v;
            }
        }

        cfg
    }

    /// Parse a config from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
