//! Z3 SMT Solver Backend - 64-bit bit-vectors
//!
//! Each variable becomes one 64-bit bit-vector constant; ordering guards use
//! signed comparisons. A fresh context is created per path, so the backend is
//! `Send + Sync` and needs no locking.
//!
//! Only available when compiled with `--features z3`.
//!
//! ```bash
//! apt-get install libz3-dev  # Linux
//! brew install z3            # macOS
//!
//! cargo build --release --features z3
//! ```

#![cfg(feature = "z3")]

use std::collections::BTreeMap;
use tracing::trace;
use z3::ast::{Ast, Bool, BV};
use z3::{Config, Context, SatResult, Solver};

use super::ConstraintSolver;
use crate::features::path_enum::ExecutionPath;
use crate::features::predicate::{Predicate, PredicateKind};
use crate::features::solver::domain::{SolvedAssignment, SolverError, SolverResult};

const WIDTH: u32 = 64;

#[derive(Debug, Clone, Copy)]
pub struct Z3Backend {
    /// 0 = no limit
    timeout_ms: u64,
}

impl Z3Backend {
    /// Create backend with default timeout (5000ms)
    pub fn new() -> Self {
        Self::with_timeout(5000)
    }

    pub fn with_timeout(timeout_ms: u64) -> Self {
        Self { timeout_ms }
    }

    /// `None` when an operand-carrying kind has no operand
    fn translate<'ctx>(
        ctx: &'ctx Context,
        var: &BV<'ctx>,
        predicate: &Predicate,
    ) -> Option<Bool<'ctx>> {
        let zero = BV::from_i64(ctx, 0, WIDTH);
        let literal = |value: i64| BV::from_i64(ctx, value, WIDTH);

        Some(match (predicate.kind(), predicate.operand()) {
            (PredicateKind::NonNull, _) => var._eq(&zero).not(),
            (_, None) => return None,
            (PredicateKind::Equal, Some(v)) => var._eq(&literal(v)),
            (PredicateKind::NotEqual, Some(v)) => var._eq(&literal(v)).not(),
            (PredicateKind::Less, Some(v)) => var.bvslt(&literal(v)),
            (PredicateKind::Greater, Some(v)) => var.bvsgt(&literal(v)),
            (PredicateKind::LessOrEqual, Some(v)) => var.bvsle(&literal(v)),
            (PredicateKind::GreaterOrEqual, Some(v)) => var.bvsge(&literal(v)),
            (PredicateKind::BitmaskSet, Some(mask)) => var.bvand(&literal(mask))._eq(&zero).not(),
        })
    }
}

impl Default for Z3Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintSolver for Z3Backend {
    fn name(&self) -> &'static str {
        "z3"
    }

    fn solve_path(&self, path: &ExecutionPath) -> Result<SolverResult, SolverError> {
        let mut cfg = Config::new();
        if self.timeout_ms > 0 {
            cfg.set_timeout_msec(self.timeout_ms);
        }
        let ctx = Context::new(&cfg);
        let solver = Solver::new(&ctx);

        // One symbol per distinct name
        let vars: BTreeMap<&str, BV> = path
            .variables()
            .into_iter()
            .map(|name| (name, BV::new_const(&ctx, name, WIDTH)))
            .collect();

        for predicate in &path.predicates {
            let Some(var) = vars.get(predicate.variable()) else {
                continue;
            };
            match Self::translate(&ctx, var, predicate) {
                Some(constraint) => solver.assert(&constraint),
                None => {
                    return Ok(SolverResult::Unknown(format!(
                        "predicate '{}' has no operand",
                        predicate
                    )))
                }
            }
        }

        match solver.check() {
            SatResult::Unsat => Ok(SolverResult::Unsat),
            SatResult::Unknown => {
                trace!(path = path.index, "Z3 returned unknown");
                Ok(SolverResult::Unknown("z3 returned unknown (timeout?)".to_string()))
            }
            SatResult::Sat => {
                let model = solver
                    .get_model()
                    .ok_or_else(|| SolverError::Transient("sat without model".to_string()))?;

                let mut assignment = SolvedAssignment::new();
                for (name, var) in &vars {
                    let value = model
                        .eval(var, true)
                        .and_then(|v| v.as_u64())
                        .ok_or_else(|| {
                            SolverError::Transient(format!("no model value for '{}'", name))
                        })?;
                    assignment.insert(*name, value as i64);
                }
                debug_assert!(
                    assignment.satisfies(path),
                    "z3 model {} violates path {}",
                    assignment,
                    path.index
                );
                Ok(SolverResult::Sat(assignment))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::predicate::Origin;

    fn solve(preds: Vec<Predicate>) -> SolverResult {
        Z3Backend::new()
            .solve_path(&ExecutionPath::new(0, preds))
            .unwrap()
    }

    #[test]
    fn test_sat_round_trip() {
        let path = ExecutionPath::new(
            0,
            vec![
                Predicate::non_null("P"),
                Predicate::greater("Len", 0),
                Predicate::bitmask_set("F", 0x01),
            ],
        );
        let result = Z3Backend::new().solve_path(&path).unwrap();
        assert!(result.assignment().unwrap().satisfies(&path));
    }

    #[test]
    fn test_equal_and_not_equal_is_unsat() {
        assert_eq!(
            solve(vec![Predicate::equal("X", 5), Predicate::not_equal("X", 5)]),
            SolverResult::Unsat
        );
    }

    #[test]
    fn test_missing_operand_is_unknown() {
        let bare = Predicate::new("F", PredicateKind::BitmaskSet, None, Origin::hint("F"));
        assert!(matches!(solve(vec![bare]), SolverResult::Unknown(_)));
    }

    #[test]
    fn test_non_null_ignores_operand() {
        let p = Predicate::new("P", PredicateKind::NonNull, Some(7), Origin::hint("F"));
        let path = ExecutionPath::new(0, vec![p]);
        let result = Z3Backend::new().solve_path(&path).unwrap();
        assert_ne!(result.assignment().unwrap().get("P"), Some(0));
    }

    #[test]
    fn test_signed_comparison() {
        let path = ExecutionPath::new(0, vec![Predicate::less("X", 0)]);
        let result = Z3Backend::new().solve_path(&path).unwrap();
        assert!(result.assignment().unwrap().get("X").unwrap() < 0);
    }
}
