//! In-memory source corpus

use std::sync::Arc;

use super::body_locator::function_pattern;
use crate::features::extraction::ports::{SourceCorpus, SourceUnit};

/// Labelled texts kept in insertion order
#[derive(Debug, Default, Clone)]
pub struct InMemorySourceCorpus {
    units: Vec<SourceUnit>,
}

impl InMemorySourceCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, label: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        self.add(label, text);
        self
    }

    pub fn add(&mut self, label: impl Into<String>, text: impl Into<Arc<str>>) {
        self.units.push(SourceUnit::new(label, text));
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl SourceCorpus for InMemorySourceCorpus {
    fn candidates(&self, function: &str) -> Vec<SourceUnit> {
        let Some(pattern) = function_pattern(function) else {
            return Vec::new();
        };
        self.units
            .iter()
            .filter(|unit| pattern.is_match(&unit.text))
            .cloned()
            .collect()
    }
}
