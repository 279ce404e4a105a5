//! Predicate Domain Models

pub mod predicate;

pub use predicate::{Origin, Predicate, PredicateKind, VarId};
