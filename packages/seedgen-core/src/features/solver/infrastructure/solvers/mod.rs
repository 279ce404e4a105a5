//! Solver Implementations
//!
//! 1. **Native**: exact procedure for conjunctions of single-variable guards
//! 2. **Z3Backend**: 64-bit bit-vector SMT (optional, feature-gated)

use crate::features::path_enum::ExecutionPath;
use crate::features::solver::domain::{SolverError, SolverResult};

pub mod native;

#[cfg(feature = "z3")]
pub mod z3_backend;

/// Solver capability trait
///
/// Each call is an independent session, so one instance can serve a worker
/// pool.
pub trait ConstraintSolver: Send + Sync {
    /// Name of this solver
    fn name(&self) -> &'static str;

    /// Solve the conjunction of every predicate on `path`
    ///
    /// `Err(Transient)` abandons the path; `Err(Unavailable)` ends the run.
    fn solve_path(&self, path: &ExecutionPath) -> Result<SolverResult, SolverError>;
}
