pub mod builtin;
pub mod file_loader;

pub use builtin::register_builtin_hints;
pub use file_loader::{parse_hints_json, parse_hints_yaml, HintError};
