//! Solver infrastructure: backends and backend selection

pub mod solvers;

pub use solvers::native::NativeSolver;
pub use solvers::ConstraintSolver;

#[cfg(feature = "z3")]
pub use solvers::z3_backend::Z3Backend;

use tracing::debug;

use crate::features::solver::domain::{SolverError, SolverKind};

/// Build the configured backend
///
/// Asking for `z3` in a build without the `z3` feature is
/// `SolverError::Unavailable`.
pub fn build_solver(
    kind: SolverKind,
    timeout_ms: u64,
) -> Result<Box<dyn ConstraintSolver>, SolverError> {
    debug!(solver = %kind, timeout_ms, "Selecting solver backend");
    match kind {
        SolverKind::Native => Ok(Box::new(NativeSolver::new())),
        SolverKind::Z3 => z3_solver(timeout_ms),
    }
}

#[cfg(feature = "z3")]
fn z3_solver(timeout_ms: u64) -> Result<Box<dyn ConstraintSolver>, SolverError> {
    Ok(Box::new(Z3Backend::with_timeout(timeout_ms)))
}

#[cfg(not(feature = "z3"))]
fn z3_solver(_timeout_ms: u64) -> Result<Box<dyn ConstraintSolver>, SolverError> {
    Err(SolverError::Unavailable(
        "z3 backend not compiled in (rebuild with --features z3)".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_always_available() {
        let solver = build_solver(SolverKind::Native, 0).unwrap();
        assert_eq!(solver.name(), "native");
    }

    #[cfg(not(feature = "z3"))]
    #[test]
    fn test_z3_unavailable_without_feature() {
        let err = build_solver(SolverKind::Z3, 1000).err().unwrap();
        assert!(err.is_fatal());
    }

    #[cfg(feature = "z3")]
    #[test]
    fn test_z3_available_with_feature() {
        assert_eq!(build_solver(SolverKind::Z3, 1000).unwrap().name(), "z3");
    }
}
