//! Engine configuration
//!
//! Layers, lowest to highest precedence: preset, YAML file, environment,
//! command line. `validate()` runs once all layers are applied.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, ConfigOverrides};
use super::preset::Preset;
use super::provenance::{ConfigProvenance, ConfigSource};
use crate::features::encoding::{
    InputEncoder, DEFAULT_CAPACITY, DEFAULT_MIN_LEN, DEFAULT_PLACEHOLDER_WIDTH,
};
use crate::features::path_enum::SingleFlipEnumerator;
use crate::features::solver::{build_solver, ConstraintSolver, SolverError, SolverKind};

pub const ENV_MAX_PATHS: &str = "SEEDGEN_MAX_PATHS";
pub const ENV_SOLVER: &str = "SEEDGEN_SOLVER";
pub const ENV_SOLVER_TIMEOUT_MS: &str = "SEEDGEN_SOLVER_TIMEOUT_MS";
pub const ENV_PARALLEL: &str = "SEEDGEN_PARALLEL";

const MAX_PATHS_LIMIT: usize = 100_000;
const MAX_TIMEOUT_MS: u64 = 3_600_000;
const MAX_BUFFER: usize = 16 * 1024 * 1024;
const MAX_WORKERS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Path budget per function (straight-line path included)
    pub max_paths: usize,
    pub solver: SolverKind,
    /// Per-path solver timeout; 0 = unbounded
    pub solver_timeout_ms: u64,
    pub buffer_capacity: usize,
    pub min_artifact_len: usize,
    /// Offset advance for an unsolved argument
    pub placeholder_width: usize,
    /// Process functions on a worker pool
    pub parallel: bool,
    /// 0 = one worker per CPU
    pub workers: usize,
    /// Seed the hint registry with the built-in firmware hints
    pub builtin_hints: bool,
    /// Extensions kept when walking a source directory
    pub source_extensions: Vec<String>,

    #[serde(skip)]
    provenance: Option<ConfigProvenance>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl EngineConfig {
    pub fn preset(preset: Preset) -> Self {
        Self {
            max_paths: preset.max_paths(),
            solver: SolverKind::Native,
            solver_timeout_ms: preset.solver_timeout_ms(),
            buffer_capacity: DEFAULT_CAPACITY,
            min_artifact_len: DEFAULT_MIN_LEN,
            placeholder_width: DEFAULT_PLACEHOLDER_WIDTH,
            parallel: false,
            workers: 0,
            builtin_hints: true,
            source_extensions: vec!["c".to_string(), "h".to_string()],
            provenance: Some(ConfigProvenance::from_preset(preset)),
        }
    }

    pub fn provenance(&self) -> Option<&ConfigProvenance> {
        self.provenance.as_ref()
    }

    fn track(&mut self, field: &str, source: ConfigSource) {
        self.provenance
            .get_or_insert_with(|| ConfigProvenance::from_preset(Preset::default()))
            .track_field(field, source);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Layers
    // ═══════════════════════════════════════════════════════════════════════

    /// Preset and YAML layers, then environment
    ///
    /// `preset` (from the command line) replaces the preset named in the file.
    pub fn load(yaml: Option<&Path>, preset: Option<Preset>) -> ConfigResult<Self> {
        let mut config = match yaml {
            Some(path) => Self::from_yaml_with_preset(path, preset)?,
            None => Self::preset(preset.unwrap_or_default()),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::from_yaml_with_preset(path, None)
    }

    fn from_yaml_with_preset(path: impl AsRef<Path>, preset: Option<Preset>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content, &path.display().to_string(), preset)
    }

    /// Parse schema v1 text; `origin` labels the source in provenance
    pub fn from_yaml_str(content: &str, origin: &str, preset: Option<Preset>) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        if file.version != 1 {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                supported: vec![1],
            });
        }

        let base = match (preset, file.preset.as_deref()) {
            (Some(p), _) => p,
            (None, Some(name)) => name
                .parse::<Preset>()
                .map_err(|_| ConfigError::UnknownPreset(name.to_string()))?,
            (None, None) => Preset::default(),
        };

        let mut config = Self::preset(base);
        if let Some(overrides) = file.overrides {
            config.apply_overrides(
                overrides,
                ConfigSource::Yaml {
                    path: origin.to_string(),
                },
            );
        }
        debug!(origin, preset = %base, "Configuration file loaded");
        Ok(config)
    }

    pub fn apply_overrides(&mut self, o: ConfigOverrides, source: ConfigSource) {
        macro_rules! set {
            ($field:ident) => {
                if let Some(value) = o.$field {
                    self.$field = value;
                    self.track(stringify!($field), source.clone());
                }
            };
        }
        set!(max_paths);
        set!(solver);
        set!(solver_timeout_ms);
        set!(buffer_capacity);
        set!(min_artifact_len);
        set!(placeholder_width);
        set!(parallel);
        set!(workers);
        set!(builtin_hints);
        set!(source_extensions);
    }

    /// Apply `SEEDGEN_*` variables from the process environment
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Apply `SEEDGEN_*` variables from an arbitrary lookup
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(raw) = lookup(ENV_MAX_PATHS) {
            self.max_paths = raw.trim().parse().map_err(|_| {
                ConfigError::invalid_value(ENV_MAX_PATHS, raw.clone(), "a positive integer")
            })?;
            self.track("max_paths", ConfigSource::Env(ENV_MAX_PATHS.into()));
        }
        if let Some(raw) = lookup(ENV_SOLVER) {
            self.solver = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value(ENV_SOLVER, raw.clone(), "native or z3"))?;
            self.track("solver", ConfigSource::Env(ENV_SOLVER.into()));
        }
        if let Some(raw) = lookup(ENV_SOLVER_TIMEOUT_MS) {
            self.solver_timeout_ms = raw.trim().parse().map_err(|_| {
                ConfigError::invalid_value(ENV_SOLVER_TIMEOUT_MS, raw.clone(), "milliseconds")
            })?;
            self.track("solver_timeout_ms", ConfigSource::Env(ENV_SOLVER_TIMEOUT_MS.into()));
        }
        if let Some(raw) = lookup(ENV_PARALLEL) {
            self.parallel = parse_bool(&raw).ok_or_else(|| {
                ConfigError::invalid_value(ENV_PARALLEL, raw.clone(), "true or false")
            })?;
            self.track("parallel", ConfigSource::Env(ENV_PARALLEL.into()));
        }
        Ok(())
    }

    /// Export as schema v1 YAML (every field as an override)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let preset = self
            .provenance
            .as_ref()
            .map(|p| p.preset())
            .unwrap_or_default();
        let file = ConfigFileV1 {
            version: 1,
            preset: Some(preset.to_string()),
            overrides: Some(ConfigOverrides {
                max_paths: Some(self.max_paths),
                solver: Some(self.solver),
                solver_timeout_ms: Some(self.solver_timeout_ms),
                buffer_capacity: Some(self.buffer_capacity),
                min_artifact_len: Some(self.min_artifact_len),
                placeholder_width: Some(self.placeholder_width),
                parallel: Some(self.parallel),
                workers: Some(self.workers),
                builtin_hints: Some(self.builtin_hints),
                source_extensions: Some(self.source_extensions.clone()),
            }),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Validation
    // ═══════════════════════════════════════════════════════════════════════

    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_PATHS_LIMIT).contains(&self.max_paths) {
            return Err(ConfigError::range_with_hint(
                "max_paths",
                self.max_paths,
                1,
                MAX_PATHS_LIMIT,
                "The straight-line path always counts as one",
            ));
        }
        if self.solver_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::range_with_hint(
                "solver_timeout_ms",
                self.solver_timeout_ms,
                0,
                MAX_TIMEOUT_MS,
                "Use 0 for no timeout",
            ));
        }
        if !(1..=MAX_BUFFER).contains(&self.min_artifact_len) {
            return Err(ConfigError::range_with_hint(
                "min_artifact_len",
                self.min_artifact_len,
                1,
                MAX_BUFFER,
                "Artifacts are zero-padded to this length",
            ));
        }
        if !(1..=MAX_BUFFER).contains(&self.buffer_capacity) {
            return Err(ConfigError::range_with_hint(
                "buffer_capacity",
                self.buffer_capacity,
                1,
                MAX_BUFFER,
                "Upper bound on encoded bytes",
            ));
        }
        if self.buffer_capacity < self.min_artifact_len {
            return Err(ConfigError::Conflict {
                issue: format!(
                    "buffer_capacity {} is below min_artifact_len {}",
                    self.buffer_capacity, self.min_artifact_len
                ),
                fix: "raise buffer_capacity or lower min_artifact_len".to_string(),
            });
        }
        if !(1..=64).contains(&self.placeholder_width) {
            return Err(ConfigError::range_with_hint(
                "placeholder_width",
                self.placeholder_width,
                1,
                64,
                "Bytes skipped for an unsolved argument",
            ));
        }
        if self.workers > MAX_WORKERS {
            return Err(ConfigError::range_with_hint(
                "workers",
                self.workers,
                0,
                MAX_WORKERS,
                "Use 0 for one worker per CPU",
            ));
        }
        if self.source_extensions.is_empty() {
            return Err(ConfigError::Conflict {
                issue: "source_extensions is empty".to_string(),
                fix: "list at least one extension, e.g. [c, h]".to_string(),
            });
        }
        Ok(())
    }

    /// Worker count with 0 resolved to the CPU count
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    pub fn encoder(&self) -> InputEncoder {
        InputEncoder::new(self.buffer_capacity, self.min_artifact_len, self.placeholder_width)
    }

    pub fn enumerator(&self) -> SingleFlipEnumerator {
        SingleFlipEnumerator::new(self.max_paths)
    }

    /// Instantiate the configured backend; `Unavailable` is fatal for a run
    pub fn build_solver(&self) -> Result<Box<dyn ConstraintSolver>, SolverError> {
        build_solver(self.solver, self.solver_timeout_ms)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // CLI layer
    // ═══════════════════════════════════════════════════════════════════════

    pub fn with_max_paths(mut self, max_paths: usize) -> Self {
        self.max_paths = max_paths;
        self.track("max_paths", ConfigSource::Cli);
        self
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self.track("solver", ConfigSource::Cli);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self.track("parallel", ConfigSource::Cli);
        self
    }

    pub fn with_builtin_hints(mut self, builtin_hints: bool) -> Self {
        self.builtin_hints = builtin_hints;
        self.track("builtin_hints", ConfigSource::Cli);
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_paths, 100);
        assert_eq!(config.solver, SolverKind::Native);
        assert_eq!(config.solver_timeout_ms, 5000);
        assert_eq!(config.buffer_capacity, 4096);
        assert_eq!(config.min_artifact_len, 1024);
        assert_eq!(config.placeholder_width, 8);
        assert!(!config.parallel);
        assert!(config.builtin_hints);
        assert_eq!(config.source_extensions, vec!["c", "h"]);
        config.validate().unwrap();
    }

    #[test]
    fn test_builtin_hints_opt_out() {
        let config = EngineConfig::default().with_builtin_hints(false);
        assert!(!config.builtin_hints);
        assert_eq!(
            config.provenance().unwrap().get_source("builtin_hints"),
            Some(&ConfigSource::Cli)
        );

        let config = EngineConfig::from_yaml_str(
            "version: 1\noverrides:\n  builtin_hints: false\n",
            "team.yaml",
            None,
        )
        .unwrap();
        assert!(!config.builtin_hints);
    }

    #[test]
    fn test_yaml_layer() {
        let config = EngineConfig::from_yaml_str(
            "version: 1\npreset: fast\noverrides:\n  max_paths: 25\n  parallel: true\n",
            "team.yaml",
            None,
        )
        .unwrap();

        assert_eq!(config.max_paths, 25);
        assert_eq!(config.solver_timeout_ms, 1000);
        assert!(config.parallel);
        assert_eq!(
            config.provenance().unwrap().get_source("max_paths"),
            Some(&ConfigSource::Yaml { path: "team.yaml".into() })
        );
    }

    #[test]
    fn test_cli_preset_replaces_file_preset() {
        let config =
            EngineConfig::from_yaml_str("version: 1\npreset: fast\n", "x.yaml", Some(Preset::Thorough))
                .unwrap();
        assert_eq!(config.max_paths, 1000);
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let err = EngineConfig::from_yaml_str("version: 2\n", "x.yaml", None).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_yaml_unknown_preset() {
        let err = EngineConfig::from_yaml_str("version: 1\npreset: turbo\n", "x.yaml", None).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(_)));
    }

    #[test]
    fn test_yaml_file_loading() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"version: 1\noverrides:\n  solver: z3\n").unwrap();

        let config = EngineConfig::from_yaml(file.path()).unwrap();
        assert_eq!(config.solver, SolverKind::Z3);
        assert_eq!(config.max_paths, 100);
    }

    #[test]
    fn test_env_layer_over_yaml() {
        let mut config = EngineConfig::from_yaml_str(
            "version: 1\noverrides:\n  max_paths: 25\n",
            "x.yaml",
            None,
        )
        .unwrap();
        config
            .apply_env_from(env(&[(ENV_MAX_PATHS, "7"), (ENV_PARALLEL, "yes")]))
            .unwrap();

        assert_eq!(config.max_paths, 7);
        assert!(config.parallel);
        assert_eq!(
            config.provenance().unwrap().get_source("max_paths"),
            Some(&ConfigSource::Env(ENV_MAX_PATHS.into()))
        );
    }

    #[test]
    fn test_env_invalid_value() {
        let mut config = EngineConfig::default();
        let err = config.apply_env_from(env(&[(ENV_SOLVER, "cvc5")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_cli_layer_wins() {
        let mut config = EngineConfig::default();
        config.apply_env_from(env(&[(ENV_MAX_PATHS, "7")])).unwrap();
        let config = config.with_max_paths(3);
        assert_eq!(config.max_paths, 3);
        assert_eq!(config.provenance().unwrap().get_source("max_paths"), Some(&ConfigSource::Cli));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(EngineConfig::default().with_max_paths(0).validate().is_err());
        assert!(EngineConfig::default().with_max_paths(100_001).validate().is_err());

        let mut config = EngineConfig::default();
        config.buffer_capacity = 512;
        assert!(matches!(config.validate(), Err(ConfigError::Conflict { .. })));

        let mut config = EngineConfig::default();
        config.placeholder_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = EngineConfig::preset(Preset::Fast).with_max_paths(42);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: fast"));
        assert!(yaml.contains("max_paths: 42"));

        let back = EngineConfig::from_yaml_str(&yaml, "roundtrip", None).unwrap();
        assert_eq!(back.max_paths, 42);
        assert_eq!(back.solver_timeout_ms, 1000);
    }

    #[test]
    fn test_component_builders() {
        let config = EngineConfig::preset(Preset::Fast);
        assert_eq!(config.enumerator().budget(), 10);
        assert_eq!(config.encoder().capacity(), 4096);
        assert_eq!(config.build_solver().unwrap().name(), "native");
    }

    #[test]
    fn test_effective_workers() {
        let mut config = EngineConfig::default();
        assert!(config.effective_workers() >= 1);
        config.workers = 3;
        assert_eq!(config.effective_workers(), 3);
    }
}
