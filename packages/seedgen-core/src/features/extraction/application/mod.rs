//! Constraint extraction use case

use tracing::debug;

use crate::features::extraction::domain::{ExtractionMiss, ExtractionOutcome};
use crate::features::extraction::infrastructure::{locate_body, scan_body};
use crate::features::extraction::ports::SourceCorpus;

/// Recovers ordered predicates from function bodies
///
/// Stateless; identical input always yields an identical outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstraintExtractor;

impl ConstraintExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract from a single text
    pub fn extract(&self, source: &str, function: &str) -> ExtractionOutcome {
        let body = match locate_body(source, function) {
            Ok(body) => body,
            Err(miss) => return ExtractionOutcome::missed(miss),
        };

        let scan = scan_body(body, function);
        ExtractionOutcome {
            predicates: scan.predicates,
            miss: None,
            skipped: scan.skipped,
            unit: None,
        }
    }

    /// Extract from the first corpus unit that yields a balanced body
    ///
    /// When every candidate misses, the reported miss is the most specific
    /// one seen (unbalanced over no-brace over not-found).
    pub fn extract_from_corpus(&self, corpus: &dyn SourceCorpus, function: &str) -> ExtractionOutcome {
        let mut worst = ExtractionMiss::FunctionNotFound;

        for unit in corpus.candidates(function) {
            let mut outcome = self.extract(&unit.text, function);
            match outcome.miss {
                None => {
                    debug!(
                        function,
                        unit = %unit.label,
                        predicates = outcome.predicates.len(),
                        skipped = outcome.skipped.len(),
                        "Extracted predicates"
                    );
                    outcome.unit = Some(unit.label);
                    return outcome;
                }
                Some(miss) => {
                    debug!(function, unit = %unit.label, %miss, "Candidate unit has no usable body");
                    worst = more_specific(worst, miss);
                }
            }
        }

        ExtractionOutcome::missed(worst)
    }
}

fn more_specific(a: ExtractionMiss, b: ExtractionMiss) -> ExtractionMiss {
    fn rank(miss: ExtractionMiss) -> u8 {
        match miss {
            ExtractionMiss::FunctionNotFound => 0,
            ExtractionMiss::NoOpeningBrace => 1,
            ExtractionMiss::UnbalancedBraces => 2,
        }
    }
    if rank(b) > rank(a) {
        b
    } else {
        a
    }
}
