//! Native Solver - exact, single-variable guards
//!
//! Every predicate mentions one variable and no two variables are related, so
//! the conjunction splits into independent per-variable problems. For each
//! variable we track:
//!
//! - a signed interval `[lo, hi]` (Equal, Less, Greater, LessOrEqual, GreaterOrEqual)
//! - excluded values (NotEqual, and 0 for NonNull)
//! - bitmasks that must intersect the value (BitmaskSet)
//!
//! The witness is the smallest non-negative value satisfying all three, or
//! failing that the smallest negative one. Deterministic and complete for
//! this fragment: "no witness" is a proof of unsatisfiability.
//!
//! ```rust
//! use seedgen_core::features::path_enum::ExecutionPath;
//! use seedgen_core::features::predicate::Predicate;
//! use seedgen_core::features::solver::{ConstraintSolver, NativeSolver};
//!
//! let path = ExecutionPath::new(0, vec![Predicate::greater("Len", 0)]);
//! let result = NativeSolver::new().solve_path(&path).unwrap();
//! assert_eq!(result.assignment().and_then(|a| a.get("Len")), Some(1));
//! ```

use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

use super::ConstraintSolver;
use crate::features::path_enum::ExecutionPath;
use crate::features::predicate::{Predicate, PredicateKind};
use crate::features::solver::domain::{SolvedAssignment, SolverError, SolverResult};

// ═══════════════════════════════════════════════════════════════════════════
// Per-variable domain
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
struct VarDomain {
    lo: i64,
    hi: i64,
    excluded: BTreeSet<i64>,
    masks: Vec<u64>,
    /// Set by `x < i64::MIN`, `x > i64::MAX` or a zero mask
    empty: bool,
}

impl Default for VarDomain {
    fn default() -> Self {
        Self {
            lo: i64::MIN,
            hi: i64::MAX,
            excluded: BTreeSet::new(),
            masks: Vec::new(),
            empty: false,
        }
    }
}

impl VarDomain {
    fn raise_lo(&mut self, lo: i64) {
        self.lo = self.lo.max(lo);
    }

    fn lower_hi(&mut self, hi: i64) {
        self.hi = self.hi.min(hi);
    }

    /// Returns false if the predicate lacks a required operand
    fn apply(&mut self, predicate: &Predicate) -> bool {
        match (predicate.kind(), predicate.operand()) {
            (PredicateKind::NonNull, _) => {
                self.excluded.insert(0);
            }
            (_, None) => return false,
            (PredicateKind::Equal, Some(v)) => {
                self.raise_lo(v);
                self.lower_hi(v);
            }
            (PredicateKind::NotEqual, Some(v)) => {
                self.excluded.insert(v);
            }
            (PredicateKind::Less, Some(v)) => match v.checked_sub(1) {
                Some(hi) => self.lower_hi(hi),
                None => self.empty = true,
            },
            (PredicateKind::Greater, Some(v)) => match v.checked_add(1) {
                Some(lo) => self.raise_lo(lo),
                None => self.empty = true,
            },
            (PredicateKind::LessOrEqual, Some(v)) => self.lower_hi(v),
            (PredicateKind::GreaterOrEqual, Some(v)) => self.raise_lo(v),
            (PredicateKind::BitmaskSet, Some(0)) => self.empty = true,
            (PredicateKind::BitmaskSet, Some(mask)) => self.masks.push(mask as u64),
        }
        true
    }

    fn witness(&self) -> Option<i64> {
        if self.empty || self.lo > self.hi {
            return None;
        }

        // Non-negative half first, then negative half. Within each half the
        // unsigned order of the bit patterns matches the signed order.
        if self.hi >= 0 {
            let a = self.lo.max(0) as u64;
            let b = self.hi as u64;
            if let Some(v) = self.search(a, b) {
                return Some(v as i64);
            }
        }
        if self.lo < 0 {
            let a = self.lo as u64;
            let b = self.hi.min(-1) as u64;
            if let Some(v) = self.search(a, b) {
                return Some(v as i64);
            }
        }
        None
    }

    /// Least `v` in unsigned `[a, b]` meeting every mask and not excluded
    fn search(&self, a: u64, b: u64) -> Option<u64> {
        let mut v = a;
        loop {
            v = satisfy_masks(v, &self.masks);
            if v > b {
                return None;
            }
            if self.excluded.contains(&(v as i64)) {
                v = v.checked_add(1)?;
                continue;
            }
            return Some(v);
        }
    }
}

/// Least value `>= v` intersecting every mask
///
/// For one unmet mask the least fix sets the mask's lowest bit and clears the
/// bits below it. Values only grow and never overflow, so this terminates.
fn satisfy_masks(mut v: u64, masks: &[u64]) -> u64 {
    loop {
        let mut changed = false;
        for &mask in masks {
            if v & mask == 0 {
                let bit = mask.trailing_zeros();
                let below = (1u64 << bit) - 1;
                v = (v & !below) | (1u64 << bit);
                changed = true;
            }
        }
        if !changed {
            return v;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Solver
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Clone, Copy)]
pub struct NativeSolver;

impl NativeSolver {
    pub fn new() -> Self {
        Self
    }
}

impl ConstraintSolver for NativeSolver {
    fn name(&self) -> &'static str {
        "native"
    }

    fn solve_path(&self, path: &ExecutionPath) -> Result<SolverResult, SolverError> {
        let mut domains: BTreeMap<&str, VarDomain> = BTreeMap::new();

        for predicate in &path.predicates {
            let domain = domains.entry(predicate.variable()).or_default();
            if !domain.apply(predicate) {
                return Ok(SolverResult::Unknown(format!(
                    "predicate '{}' has no operand",
                    predicate
                )));
            }
        }

        let mut assignment = SolvedAssignment::new();
        for (variable, domain) in &domains {
            match domain.witness() {
                Some(value) => assignment.insert(*variable, value),
                None => {
                    trace!(path = path.index, variable, "No witness");
                    return Ok(SolverResult::Unsat);
                }
            }
        }

        debug_assert!(assignment.satisfies(path));
        Ok(SolverResult::Sat(assignment))
    }
}
