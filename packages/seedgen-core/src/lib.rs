/*
 * Seedgen - Concolic Test-Input Generation for Firmware Fuzzing
 *
 * Feature-First Architecture:
 * - features/    : Vertical slices (predicate → extraction → path_enum → solver → encoding)
 * - config/      : Presets, YAML schema v1, env overrides, provenance
 * - pipeline/    : Batch orchestration and reporting
 *
 * Artifacts are persisted through seedgen-storage.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;

pub use config::{ConfigError, EngineConfig, Preset};
pub use errors::{Result, SeedgenError};
pub use features::encoding::{EncodedInput, InputEncoder};
pub use features::extraction::{
    ConstraintExtractor, ExtractionOutcome, FsSourceCorpus, InMemorySourceCorpus, SourceCorpus,
};
pub use features::hints::HintRegistry;
pub use features::manifest::{
    load_manifest, parse_manifest, AnalysisManifest, ArgumentDescriptor, Direction,
    FunctionManifest,
};
pub use features::path_enum::{ExecutionPath, SingleFlipEnumerator};
pub use features::predicate::{Origin, Predicate, PredicateKind};
pub use features::solver::{
    build_solver, ConstraintSolver, NativeSolver, SolvedAssignment, SolverKind, SolverResult,
};
pub use pipeline::{BatchOrchestrator, BatchReport, FunctionReport, PredicateSource};
