//! Hint Registry
//!
//! Exact, caller-supplied predicate lists that bypass textual extraction.

pub mod domain;
pub mod infrastructure;

pub use domain::HintRegistry;
pub use infrastructure::{parse_hints_json, parse_hints_yaml, register_builtin_hints, HintError};
