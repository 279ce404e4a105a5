//! Constraint Extraction
//!
//! Best-effort recovery of branch guards from C function bodies.
//!
//! ## Architecture
//!
//! ```text
//! extraction
//! ├── domain/            # ExtractionOutcome, ExtractionMiss, ParseSkip
//! ├── ports/             # SourceCorpus trait
//! ├── infrastructure/    # body locator, guard regexes, fs + memory corpora
//! └── application/       # ConstraintExtractor
//! ```
//!
//! Extraction is textual and unsound: it sees `if (` guards line by line and
//! knows nothing about scopes, macros or control flow. Callers needing exact
//! constraints register hints instead (see `features::hints`).

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::ConstraintExtractor;
pub use domain::{ExtractionMiss, ExtractionOutcome, ParseSkip};
pub use infrastructure::{FsSourceCorpus, InMemorySourceCorpus};
pub use ports::{SourceCorpus, SourceUnit};
