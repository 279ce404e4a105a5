//! Preset configurations
//!
//! Presets trade exploration depth against solver time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Smoke runs: max_paths=10, solver timeout 1s
    Fast,

    /// Default: max_paths=100, solver timeout 5s
    #[default]
    Balanced,

    /// Long campaigns: max_paths=1000, solver timeout 30s
    Thorough,
}

impl Preset {
    pub fn max_paths(&self) -> usize {
        match self {
            Self::Fast => 10,
            Self::Balanced => 100,
            Self::Thorough => 1000,
        }
    }

    pub fn solver_timeout_ms(&self) -> u64 {
        match self {
            Self::Fast => 1_000,
            Self::Balanced => 5_000,
            Self::Thorough => 30_000,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(format!(
                "Unknown preset '{}'. Valid presets: fast, balanced, thorough",
                s
            )),
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
