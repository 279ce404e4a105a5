//! Path Enumeration
//!
//! Turns one predicate list into a bounded set of execution paths.

pub mod domain;
pub mod infrastructure;

pub use domain::ExecutionPath;
pub use infrastructure::SingleFlipEnumerator;
