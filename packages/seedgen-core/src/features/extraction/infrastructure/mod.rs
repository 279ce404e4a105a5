//! Extraction infrastructure: body location, guard regexes, corpus adapters

pub mod body_locator;
pub mod fs_corpus;
pub mod guard_patterns;
pub mod memory_corpus;

pub use body_locator::{function_pattern, locate_body, mentions_function};
pub use fs_corpus::FsSourceCorpus;
pub use guard_patterns::{parse_literal, scan_body, scan_line, LineScan};
pub use memory_corpus::InMemorySourceCorpus;
