//! Predicate Model
//!
//! Typed branch guards and their negation algebra.
//!
//! ## Negation
//!
//! ```text
//! Equal          <-> NotEqual
//! Less           <-> GreaterOrEqual
//! Greater        <-> LessOrEqual
//! NonNull        ->  NonNull      (fixed point, not "is null")
//! BitmaskSet     ->  BitmaskSet   (fixed point, not "mask clear")
//! ```

pub mod domain;

pub use domain::{Origin, Predicate, PredicateKind, VarId};
