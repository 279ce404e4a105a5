//! Batch orchestrator
//!
//! For each manifest entry: hint lookup or extraction -> single-flip
//! enumeration -> solve each path -> encode -> persist one artifact per
//! solved path. Per-function failures land in the report; only an
//! unavailable solver aborts the run.

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

use seedgen_storage::{Artifact, ArtifactId, ArtifactStore};

use super::report::{BatchReport, FunctionReport, PredicateSource};
use crate::config::EngineConfig;
use crate::errors::{Result, SeedgenError};
use crate::features::encoding::InputEncoder;
use crate::features::extraction::{ConstraintExtractor, SourceCorpus};
use crate::features::hints::HintRegistry;
use crate::features::manifest::{AnalysisManifest, FunctionManifest};
use crate::features::path_enum::SingleFlipEnumerator;
use crate::features::predicate::Predicate;
use crate::features::solver::{ConstraintSolver, SolverError, SolverResult};

pub struct BatchOrchestrator {
    config: EngineConfig,
    solver: Arc<dyn ConstraintSolver>,
    store: Arc<dyn ArtifactStore>,
    extractor: ConstraintExtractor,
    enumerator: SingleFlipEnumerator,
    encoder: InputEncoder,
}

impl BatchOrchestrator {
    pub fn new(
        config: EngineConfig,
        solver: Arc<dyn ConstraintSolver>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            extractor: ConstraintExtractor::new(),
            enumerator: config.enumerator(),
            encoder: config.encoder(),
            config,
            solver,
            store,
        }
    }

    /// Validate the config and build its solver backend
    pub fn from_config(config: EngineConfig, store: Arc<dyn ArtifactStore>) -> Result<Self> {
        config.validate()?;
        let solver = config.build_solver().map_err(|e| match e {
            SolverError::Unavailable(msg) | SolverError::Transient(msg) => {
                SeedgenError::SolverUnavailable(msg)
            }
        })?;
        Ok(Self::new(config, Arc::from(solver), store))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn solver_name(&self) -> &'static str {
        self.solver.name()
    }

    /// Process every manifest entry; report order follows manifest order
    pub fn run(
        &self,
        manifest: &AnalysisManifest,
        corpus: &dyn SourceCorpus,
        hints: &HintRegistry,
    ) -> Result<BatchReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        info!(
            functions = manifest.len(),
            solver = self.solver.name(),
            max_paths = self.config.max_paths,
            parallel = self.config.parallel,
            "Starting batch"
        );

        let duplicates = duplicate_entries(manifest);
        let functions = if self.config.parallel {
            self.run_parallel(manifest, &duplicates, corpus, hints)?
        } else {
            self.run_sequential(manifest, &duplicates, corpus, hints)?
        };

        let report = BatchReport::from_functions(
            self.solver.name(),
            started_at,
            start.elapsed().as_millis() as u64,
            functions,
        );
        info!(
            artifacts = report.total_artifacts,
            succeeded = report.functions_succeeded,
            failed = report.functions_failed,
            duration_ms = report.duration_ms,
            "Batch complete"
        );
        Ok(report)
    }

    fn run_sequential(
        &self,
        manifest: &AnalysisManifest,
        duplicates: &[bool],
        corpus: &dyn SourceCorpus,
        hints: &HintRegistry,
    ) -> Result<Vec<FunctionReport>> {
        manifest
            .iter()
            .zip(duplicates)
            .map(|(function, &duplicate)| self.process_entry(function, duplicate, corpus, hints))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(
        &self,
        manifest: &AnalysisManifest,
        duplicates: &[bool],
        corpus: &dyn SourceCorpus,
        hints: &HintRegistry,
    ) -> Result<Vec<FunctionReport>> {
        use rayon::prelude::*;

        let workers = self.config.effective_workers();
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool,
            Err(e) => {
                warn!(workers, error = %e, "Worker pool unavailable, running sequentially");
                return self.run_sequential(manifest, duplicates, corpus, hints);
            }
        };
        debug!(workers, "Worker pool ready");

        pool.install(|| {
            manifest
                .functions
                .par_iter()
                .zip(duplicates.par_iter())
                .map(|(function, &duplicate)| self.process_entry(function, duplicate, corpus, hints))
                .collect()
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel(
        &self,
        manifest: &AnalysisManifest,
        duplicates: &[bool],
        corpus: &dyn SourceCorpus,
        hints: &HintRegistry,
    ) -> Result<Vec<FunctionReport>> {
        warn!("Built without the parallel feature, running sequentially");
        self.run_sequential(manifest, duplicates, corpus, hints)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Per-function pipeline
    // ═══════════════════════════════════════════════════════════════════════

    /// Repeated names are reported, not reprocessed: their artifact ids would collide
    fn process_entry(
        &self,
        function: &FunctionManifest,
        duplicate: bool,
        corpus: &dyn SourceCorpus,
        hints: &HintRegistry,
    ) -> Result<FunctionReport> {
        if !duplicate {
            return self.process_function(function, corpus, hints);
        }
        let name = function.function.as_str();
        warn!(function = name, "Duplicate manifest entry skipped");
        let mut report = FunctionReport::new(name);
        report.fail("duplicate manifest entry");
        Ok(report)
    }

    /// Only `SolverUnavailable` escapes as an error
    pub fn process_function(
        &self,
        function: &FunctionManifest,
        corpus: &dyn SourceCorpus,
        hints: &HintRegistry,
    ) -> Result<FunctionReport> {
        let name = function.function.as_str();
        let mut report = FunctionReport::new(name);
        info!(function = name, "Processing function");

        let Some(predicates) = self.predicates_for(name, corpus, hints, &mut report) else {
            return Ok(report);
        };
        report.predicates = predicates.len();
        if predicates.is_empty() {
            warn!(function = name, "No constraints recovered");
            report.fail("no constraints");
            return Ok(report);
        }

        let paths = self.enumerator.enumerate(&predicates);
        report.paths = paths.len();
        debug!(function = name, paths = paths.len(), "Paths enumerated");

        for path in &paths {
            let assignment = match self.solver.solve_path(path) {
                Ok(SolverResult::Sat(assignment)) => {
                    report.solved += 1;
                    assignment
                }
                Ok(SolverResult::Unsat) => {
                    report.unsat += 1;
                    debug!(function = name, path = path.index, "Path unsatisfiable");
                    continue;
                }
                Ok(SolverResult::Unknown(reason)) => {
                    report.unknown += 1;
                    debug!(function = name, path = path.index, reason = %reason, "Path unknown");
                    continue;
                }
                Err(SolverError::Transient(msg)) => {
                    report.unknown += 1;
                    warn!(function = name, path = path.index, error = %msg, "Solver failed on path");
                    continue;
                }
                Err(SolverError::Unavailable(msg)) => {
                    error!(function = name, error = %msg, "Solver unavailable");
                    return Err(SeedgenError::SolverUnavailable(msg));
                }
            };

            let encoded = self.encoder.encode(&assignment, function);
            if !encoded.dropped.is_empty() {
                debug!(
                    function = name,
                    path = path.index,
                    dropped = ?encoded.dropped,
                    "Arguments past buffer capacity skipped"
                );
            }

            let written = ArtifactId::new(name, path.index)
                .and_then(|id| self.store.put(&Artifact::new(id, encoded.into_bytes())));
            match written {
                Ok(record) => {
                    report.artifacts += 1;
                    debug!(
                        function = name,
                        path = path.index,
                        location = %record.location,
                        len = record.len,
                        "Artifact written"
                    );
                }
                Err(e) => {
                    let err = SeedgenError::from(e);
                    error!(function = name, path = path.index, error = %err, "Artifact write failed");
                    report.fail(err.to_string());
                    return Ok(report);
                }
            }
        }

        if report.artifacts == 0 {
            report.fail("no path solved");
        }
        info!(
            function = name,
            solved = report.solved,
            unsat = report.unsat,
            unknown = report.unknown,
            artifacts = report.artifacts,
            "Function done"
        );
        Ok(report)
    }

    /// Hints win over extraction; `None` means an extraction miss
    fn predicates_for(
        &self,
        name: &str,
        corpus: &dyn SourceCorpus,
        hints: &HintRegistry,
        report: &mut FunctionReport,
    ) -> Option<Vec<Predicate>> {
        if let Some(hinted) = hints.get(name) {
            report.source = PredicateSource::Hint;
            debug!(function = name, predicates = hinted.len(), "Using registered hint");
            return Some(hinted.to_vec());
        }

        let outcome = self.extractor.extract_from_corpus(corpus, name);
        report.skipped_literals = outcome.skipped.len();
        report.unit = outcome.unit.clone();
        for skip in &outcome.skipped {
            debug!(function = name, line = skip.line, literal = %skip.literal, "Literal skipped");
        }
        if let Some(miss) = outcome.miss {
            warn!(function = name, reason = %miss, "Extraction miss");
            report.fail(miss.to_string());
            return None;
        }
        if !outcome.predicates.is_empty() {
            report.source = PredicateSource::Extracted;
        }
        Some(outcome.into_predicates())
    }
}

/// `true` for every entry whose name already appeared earlier in the manifest
fn duplicate_entries(manifest: &AnalysisManifest) -> Vec<bool> {
    let mut seen = HashSet::new();
    manifest
        .iter()
        .map(|function| !seen.insert(function.function.as_str()))
        .collect()
}
