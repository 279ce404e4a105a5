//! Single branch-flip enumeration
//!
//! ```text
//! C = [c0, c1, c2]
//!
//! p0: c0  c1  c2      straight-line
//! p1: !c0             flip c0, drop the rest
//! p2: c0  !c1
//! p3: c0  c1  !c2
//! ```
//!
//! Linear in the number of predicates. Downstream guards are dropped after a
//! flip, so this is a bounded sample of the path space and not exhaustive.

use crate::features::path_enum::domain::ExecutionPath;
use crate::features::predicate::Predicate;

#[derive(Debug, Clone, Copy)]
pub struct SingleFlipEnumerator {
    budget: usize,
}

impl SingleFlipEnumerator {
    /// A budget of 0 is treated as 1
    pub fn new(budget: usize) -> Self {
        Self {
            budget: budget.max(1),
        }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Produces exactly `min(n + 1, budget)` paths
    pub fn enumerate(&self, predicates: &[Predicate]) -> Vec<ExecutionPath> {
        let count = (predicates.len() + 1).min(self.budget);
        let mut paths = Vec::with_capacity(count);

        paths.push(ExecutionPath::new(0, predicates.to_vec()));

        for (i, flipped) in predicates.iter().enumerate() {
            if paths.len() >= count {
                break;
            }
            let mut prefix = Vec::with_capacity(i + 1);
            prefix.extend_from_slice(&predicates[..i]);
            prefix.push(flipped.negated());
            paths.push(ExecutionPath::new(i + 1, prefix));
        }

        paths
    }
}
