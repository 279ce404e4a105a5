//! Engine configuration
//!
//! Preset -> YAML (schema v1) -> `SEEDGEN_*` environment -> CLI flags.
//! Every overridden field records its source in [`ConfigProvenance`].

mod engine_config;
mod error;
mod io;
mod preset;
mod provenance;

pub use engine_config::{
    EngineConfig, ENV_MAX_PATHS, ENV_PARALLEL, ENV_SOLVER, ENV_SOLVER_TIMEOUT_MS,
};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, ConfigOverrides};
pub use preset::Preset;
pub use provenance::{ConfigProvenance, ConfigSource};
