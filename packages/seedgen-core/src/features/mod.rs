//! Feature modules
//!
//! Each feature follows the same layering:
//! - `domain/`: plain data types and invariants
//! - `infrastructure/`: parsers, backends, adapters
//! - `application/` / `ports/`: use cases and the traits they depend on
//!
//! Data flows predicate -> extraction -> path_enum -> solver -> encoding,
//! with manifest and hints feeding the pipeline from the outside.

pub mod encoding;
pub mod extraction;
pub mod hints;
pub mod manifest;
pub mod path_enum;
pub mod predicate;
pub mod solver;
