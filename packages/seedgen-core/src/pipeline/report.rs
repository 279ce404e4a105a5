//! Batch report
//!
//! ```text
//! BatchReport
//! ├── total_artifacts
//! ├── functions_processed / succeeded / failed
//! └── functions: Vec<FunctionReport>   (manifest order)
//!     ├── source: hint | extracted | none
//!     ├── predicates, paths
//!     ├── solved, unsat, unknown
//!     └── artifacts, error
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Where a function's predicates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredicateSource {
    /// Registered in the hint registry
    Hint,
    /// Recovered from the source corpus
    Extracted,
    /// Neither; the function produced no predicates
    None,
}

impl PredicateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::Extracted => "extracted",
            Self::None => "none",
        }
    }
}

/// Per-function outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub function: String,
    pub source: PredicateSource,
    /// Source unit the predicates were extracted from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub predicates: usize,
    /// Literals dropped during extraction
    pub skipped_literals: usize,
    pub paths: usize,
    pub solved: usize,
    pub unsat: usize,
    pub unknown: usize,
    pub artifacts: usize,
    /// Why the function produced nothing (or stopped early)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FunctionReport {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            source: PredicateSource::None,
            unit: None,
            predicates: 0,
            skipped_literals: 0,
            paths: 0,
            solved: 0,
            unsat: 0,
            unknown: 0,
            artifacts: 0,
            error: None,
        }
    }

    /// At least one artifact and no error
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.artifacts > 0
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
    }
}

/// Aggregated batch result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_artifacts: usize,
    pub functions_processed: usize,
    pub functions_succeeded: usize,
    pub functions_failed: usize,
    pub solver: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub functions: Vec<FunctionReport>,
}

impl BatchReport {
    pub fn from_functions(
        solver: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        functions: Vec<FunctionReport>,
    ) -> Self {
        let succeeded = functions.iter().filter(|f| f.succeeded()).count();
        Self {
            total_artifacts: functions.iter().map(|f| f.artifacts).sum(),
            functions_processed: functions.len(),
            functions_succeeded: succeeded,
            functions_failed: functions.len() - succeeded,
            solver: solver.into(),
            started_at,
            duration_ms,
            functions,
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunctionReport> {
        self.functions.iter().find(|f| f.function == name)
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Generated {} inputs from {} functions ({} succeeded, {} failed) in {} ms",
            self.total_artifacts,
            self.functions_processed,
            self.functions_succeeded,
            self.functions_failed,
            self.duration_ms
        )
    }

    /// Human-readable table
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<32} {:<9} {:>5} {:>5} {:>6} {:>5} {:>7} {:>9}",
            "function", "source", "preds", "paths", "solved", "unsat", "unknown", "artifacts"
        );
        for f in &self.functions {
            let _ = write!(
                out,
                "{:<32} {:<9} {:>5} {:>5} {:>6} {:>5} {:>7} {:>9}",
                f.function,
                f.source.as_str(),
                f.predicates,
                f.paths,
                f.solved,
                f.unsat,
                f.unknown,
                f.artifacts
            );
            if let Some(err) = &f.error {
                let _ = write!(out, "  ({})", err);
            }
            out.push('\n');
        }
        out.push_str(&self.summary());
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
