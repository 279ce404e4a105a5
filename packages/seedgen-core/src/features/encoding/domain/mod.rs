//! Encoding Domain Models

use serde::{Deserialize, Serialize};

/// What occupies a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotKind {
    /// Solved value written little-endian
    Written,
    /// Variable unsolved; bytes left zero
    Placeholder,
}

/// Position of one IN argument inside the buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotLayout {
    pub argument: String,
    pub offset: usize,
    pub width: usize,
    pub kind: SlotKind,
}

/// Encoded buffer plus its layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedInput {
    /// Final artifact bytes: `max(used_len, min_len)` long
    pub bytes: Vec<u8>,
    /// Offset after the last slot
    pub used_len: usize,
    pub slots: Vec<SlotLayout>,
    /// IN arguments dropped because they would cross capacity
    pub dropped: Vec<String>,
}

impl EncodedInput {
    pub fn slot(&self, argument: &str) -> Option<&SlotLayout> {
        self.slots.iter().find(|s| s.argument == argument)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
