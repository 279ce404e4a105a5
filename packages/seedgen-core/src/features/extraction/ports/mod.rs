//! Source corpus port
//!
//! The extractor only needs plain text searchable by function name. Where
//! that text lives (a file tree, memory, an archive) is the adapter's concern.

use std::sync::Arc;

/// One searchable piece of source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Human-readable label (file path for filesystem corpora)
    pub label: String,
    pub text: Arc<str>,
}

impl SourceUnit {
    pub fn new(label: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Read-only corpus searchable by function name
pub trait SourceCorpus: Send + Sync {
    /// Units whose text mentions `function` followed by `(`, in a deterministic order
    fn candidates(&self, function: &str) -> Vec<SourceUnit>;
}
