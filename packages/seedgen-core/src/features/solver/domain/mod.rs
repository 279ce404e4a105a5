//! Solver Domain Models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::features::path_enum::ExecutionPath;

/// Variable name -> concrete 64-bit value
///
/// Values are stored as `i64`; encoders reinterpret the bits as unsigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvedAssignment {
    values: BTreeMap<String, i64>,
}

impl SolvedAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variable: impl Into<String>, value: i64) {
        self.values.insert(variable.into(), value);
    }

    pub fn with(mut self, variable: impl Into<String>, value: i64) -> Self {
        self.insert(variable, value);
        self
    }

    pub fn get(&self, variable: &str) -> Option<i64> {
        self.values.get(variable).copied()
    }

    pub fn contains(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Every predicate of `path` holds under this assignment
    ///
    /// A variable missing from the assignment fails its predicates.
    pub fn satisfies(&self, path: &ExecutionPath) -> bool {
        path.predicates.iter().all(|p| {
            self.get(p.variable())
                .and_then(|value| p.evaluate(value))
                .unwrap_or(false)
        })
    }
}

impl FromIterator<(String, i64)> for SolvedAssignment {
    fn from_iter<T: IntoIterator<Item = (String, i64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for SolvedAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        write!(f, "}}")
    }
}

/// Outcome of solving one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult {
    /// Satisfiable, with one model (not necessarily minimal)
    Sat(SolvedAssignment),
    /// Proven contradictory
    Unsat,
    /// Timeout or unsupported input; the path is abandoned
    Unknown(String),
}

impl SolverResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    pub fn assignment(&self) -> Option<&SolvedAssignment> {
        match self {
            Self::Sat(assignment) => Some(assignment),
            _ => None,
        }
    }

    pub fn into_assignment(self) -> Option<SolvedAssignment> {
        match self {
            Self::Sat(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Solver failures
///
/// `Unavailable` stops the whole run; `Transient` only abandons one path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("solver backend unavailable: {0}")]
    Unavailable(String),

    #[error("solver error: {0}")]
    Transient(String),
}

impl SolverError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Solver backend selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// Built-in exact procedure for single-variable guards
    #[default]
    Native,
    /// Z3 bit-vector backend (cargo feature `z3`)
    Z3,
}

impl SolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Z3 => "z3",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "z3" => Ok(Self::Z3),
            other => Err(format!("unknown solver '{}' (expected native or z3)", other)),
        }
    }
}
