//! Extraction Domain Models
//!
//! Extraction never fails hard. A missing function or an unbalanced body is an
//! `ExtractionMiss` (empty predicate list); an unparseable literal is a
//! `ParseSkip` (that one predicate dropped). Both are reported as diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::features::predicate::Predicate;

/// Why no body could be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMiss {
    /// No `<name> (` occurrence in any source unit
    FunctionNotFound,
    /// Name found but no `{` after it
    NoOpeningBrace,
    /// `{` found but the matching `}` never arrives
    UnbalancedBraces,
}

impl fmt::Display for ExtractionMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FunctionNotFound => write!(f, "function not found"),
            Self::NoOpeningBrace => write!(f, "no opening brace after function name"),
            Self::UnbalancedBraces => write!(f, "braces never balance"),
        }
    }
}

/// A guard whose literal could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSkip {
    /// 0-based line within the extracted body
    pub line: usize,
    /// Offending literal text
    pub literal: String,
}

/// Result of extracting one function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Predicates in source line order
    pub predicates: Vec<Predicate>,
    /// Set when no body was found
    pub miss: Option<ExtractionMiss>,
    /// Literals dropped during the scan
    pub skipped: Vec<ParseSkip>,
    /// Label of the source unit the body came from
    pub unit: Option<String>,
}

impl ExtractionOutcome {
    pub fn missed(miss: ExtractionMiss) -> Self {
        Self {
            miss: Some(miss),
            ..Self::default()
        }
    }

    pub fn is_miss(&self) -> bool {
        self.miss.is_some()
    }

    pub fn into_predicates(self) -> Vec<Predicate> {
        self.predicates
    }
}
