//! Configuration provenance tracking
//!
//! Track where each setting came from (preset, YAML, env, CLI)

use super::preset::Preset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration provenance tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigProvenance {
    /// Base preset used
    preset: Preset,

    /// Field name -> last source that set it
    field_sources: BTreeMap<String, ConfigSource>,
}

/// Configuration source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// From preset defaults
    Preset(Preset),

    /// From YAML file
    Yaml { path: String },

    /// From environment variable
    Env(String),

    /// From a command-line flag
    Cli,
}

impl ConfigProvenance {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            field_sources: BTreeMap::new(),
        }
    }

    /// Record field-level override
    pub fn track_field(&mut self, field: &str, source: ConfigSource) {
        self.field_sources.insert(field.to_string(), source);
    }

    pub fn get_source(&self, field: &str) -> Option<&ConfigSource> {
        self.field_sources.get(field)
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn field_sources(&self) -> &BTreeMap<String, ConfigSource> {
        &self.field_sources
    }

    /// Get human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Base preset: {}", self.preset)];
        for (field, source) in &self.field_sources {
            lines.push(format!("  {} <- {}", field, source.describe()));
        }
        lines.join("\n")
    }
}

impl ConfigSource {
    /// Get a short description
    pub fn describe(&self) -> String {
        match self {
            ConfigSource::Preset(p) => format!("preset:{}", p),
            ConfigSource::Yaml { path } => format!("yaml:{}", path),
            ConfigSource::Env(var) => format!("env:{}", var),
            ConfigSource::Cli => "cli".to_string(),
        }
    }
}
