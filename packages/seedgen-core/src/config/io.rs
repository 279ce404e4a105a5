//! Configuration I/O (YAML schema types)
//!
//! ```yaml
//! version: 1
//! preset: fast
//! overrides:
//!   max_paths: 25
//!   solver: z3
//! ```

use serde::{Deserialize, Serialize};

use crate::features::solver::SolverKind;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    /// Base preset (defaults to balanced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Field overrides; absent fields keep the preset value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub solver_timeout_ms: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buffer_capacity: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_artifact_len: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_width: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin_hints: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_extensions: Option<Vec<String>>,
}
