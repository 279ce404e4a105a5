//! Error types for seedgen-core
//!
//! Only run-level failures surface here. Extraction misses, parse skips and
//! unsatisfiable paths are diagnostics recorded in the batch report.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::hints::HintError;
use crate::features::manifest::ManifestError;

/// Main error type for seedgen-core operations
#[derive(Debug, Error)]
pub enum SeedgenError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Analysis manifest could not be loaded
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Hint file could not be loaded
    #[error("Hint error: {0}")]
    Hints(#[from] HintError),

    /// Solver backend missing or misconfigured; aborts the run
    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),

    /// Artifact store error
    #[error("Storage error: {0}")]
    Storage(#[from] seedgen_storage::StorageError),
}

/// Result type alias for seedgen operations
pub type Result<T> = std::result::Result<T, SeedgenError>;
