//! Execution Path Domain Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::features::predicate::Predicate;

/// Ordered conjunction of predicates along one hypothesized route
///
/// Solved as a unit, never partially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPath {
    /// Position in the enumeration (0 = straight-line)
    pub index: usize,
    pub predicates: Vec<Predicate>,
}

impl ExecutionPath {
    pub fn new(index: usize, predicates: Vec<Predicate>) -> Self {
        Self { index, predicates }
    }

    pub fn is_straight_line(&self) -> bool {
        self.index == 0
    }

    /// Distinct variable names, sorted
    pub fn variables(&self) -> BTreeSet<&str> {
        self.predicates.iter().map(|p| p.variable()).collect()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Display for ExecutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}: ", self.index)?;
        if self.predicates.is_empty() {
            return write!(f, "true");
        }
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                write!(f, " && ")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}
