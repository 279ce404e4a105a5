//! Hint Registry
//!
//! Hand-authored predicate lists keyed by function name. A registered hint
//! replaces extraction for that function. Passed explicitly to the
//! orchestrator; there is no process-wide registry.

use std::collections::BTreeMap;

use crate::features::predicate::{Origin, Predicate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintRegistry {
    hints: BTreeMap<String, Vec<Predicate>>,
}

impl HintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `predicates` for `function`; the last registration wins
    ///
    /// Every predicate is re-tagged with a hint origin for `function`.
    pub fn register(&mut self, function: impl Into<String>, predicates: Vec<Predicate>) {
        let function = function.into();
        let tagged = predicates
            .into_iter()
            .map(|p| p.with_origin(Origin::hint(function.clone())))
            .collect();
        self.hints.insert(function, tagged);
    }

    pub fn get(&self, function: &str) -> Option<&[Predicate]> {
        self.hints.get(function).map(Vec::as_slice)
    }

    pub fn contains(&self, function: &str) -> bool {
        self.hints.contains_key(function)
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.hints.keys().map(String::as_str)
    }

    /// Merge `other` into `self`; entries from `other` win
    pub fn extend(&mut self, other: HintRegistry) {
        self.hints.extend(other.hints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_last_registration_wins() {
        let mut registry = HintRegistry::new();
        registry.register("F", vec![Predicate::non_null("P")]);
        registry.register("F", vec![Predicate::greater("Len", 0)]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("F").unwrap(), &[Predicate::greater("Len", 0).with_origin(Origin::hint("F"))]);
    }

    #[test]
    fn test_origin_is_tagged() {
        let mut registry = HintRegistry::new();
        registry.register("Foo", vec![Predicate::non_null("P")]);
        assert_eq!(registry.get("Foo").unwrap()[0].origin().to_string(), "Foo:hint");
    }

    #[test]
    fn test_unknown_function() {
        let registry = HintRegistry::new();
        assert!(registry.get("F").is_none());
        assert!(!registry.contains("F"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_extend_overrides() {
        let mut a = HintRegistry::new();
        a.register("F", vec![Predicate::non_null("A")]);
        let mut b = HintRegistry::new();
        b.register("F", vec![Predicate::non_null("B")]);
        b.register("G", vec![]);

        a.extend(b);
        assert_eq!(a.get("F").unwrap()[0].variable(), "B");
        assert_eq!(a.functions().collect::<Vec<_>>(), vec!["F", "G"]);
    }
}
