//! Batch pipeline
//!
//! manifest entry -> predicates -> paths -> assignments -> bytes -> artifacts

mod orchestrator;
mod report;

pub use orchestrator::BatchOrchestrator;
pub use report::{BatchReport, FunctionReport, PredicateSource};
