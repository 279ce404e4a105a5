//! Solver Adapter
//!
//! Translates an execution path into solver primitives and returns one
//! satisfying assignment, a proof of unsatisfiability, or "unknown".
//!
//! ## Architecture
//!
//! ```text
//! solver
//! ├── domain/               # SolvedAssignment, SolverResult, SolverError, SolverKind
//! └── infrastructure/
//!     ├── build_solver      # backend selection
//!     └── solvers/
//!         ├── native        # exact single-variable procedure (default)
//!         └── z3_backend    # bit-vector SMT (feature "z3")
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{SolvedAssignment, SolverError, SolverKind, SolverResult};
pub use infrastructure::{build_solver, ConstraintSolver, NativeSolver};

#[cfg(feature = "z3")]
pub use infrastructure::Z3Backend;
