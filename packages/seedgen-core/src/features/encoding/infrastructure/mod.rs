//! Input Encoder
//!
//! Packs a solved assignment into the argument layout of one function:
//!
//! ```text
//! manifest:   This(IN, EFI_X *)  OpFlags(IN, UINT16)  Out(OUT)  Len(IN, UINT32)
//! assignment: This = 1           (unsolved)                     Len = 6
//!
//! offset 0         4                    12         16 ... min_len
//!        | This 4B | OpFlags placeholder | Len 4B   | zero fill
//! ```
//!
//! Unsolved variables still advance the offset by a fixed placeholder width,
//! so later slots stay put whether or not earlier ones were solved.

use byteorder::{ByteOrder, LittleEndian};
use tracing::trace;

use crate::features::encoding::domain::{EncodedInput, SlotKind, SlotLayout};
use crate::features::manifest::FunctionManifest;
use crate::features::solver::SolvedAssignment;

pub const DEFAULT_CAPACITY: usize = 4096;
pub const DEFAULT_MIN_LEN: usize = 1024;
pub const DEFAULT_PLACEHOLDER_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct InputEncoder {
    capacity: usize,
    min_len: usize,
    placeholder_width: usize,
}

impl Default for InputEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_MIN_LEN, DEFAULT_PLACEHOLDER_WIDTH)
    }
}

impl InputEncoder {
    /// Capacity is raised to `min_len` if smaller
    pub fn new(capacity: usize, min_len: usize, placeholder_width: usize) -> Self {
        Self {
            capacity: capacity.max(min_len),
            min_len,
            placeholder_width,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn encode(&self, assignment: &SolvedAssignment, manifest: &FunctionManifest) -> EncodedInput {
        let mut buf = vec![0u8; self.capacity];
        let mut offset = 0usize;
        let mut slots = Vec::new();
        let mut dropped = Vec::new();

        for arg in manifest.inputs() {
            let (width, value) = match assignment.get(&arg.backing_variable) {
                Some(value) => (arg.width_hint().byte_width(), Some(value as u64)),
                None => (self.placeholder_width, None),
            };

            if !dropped.is_empty() || offset + width > self.capacity {
                dropped.push(arg.name.clone());
                continue;
            }

            let slot = &mut buf[offset..offset + width];
            let kind = match value {
                Some(v) => {
                    write_le(slot, v);
                    SlotKind::Written
                }
                None => SlotKind::Placeholder,
            };
            slots.push(SlotLayout {
                argument: arg.name.clone(),
                offset,
                width,
                kind,
            });
            offset += width;
        }

        if !dropped.is_empty() {
            trace!(
                function = %manifest.function,
                dropped = dropped.len(),
                "Arguments beyond buffer capacity skipped"
            );
        }

        buf.truncate(offset.max(self.min_len));
        EncodedInput {
            bytes: buf,
            used_len: offset,
            slots,
            dropped,
        }
    }
}

/// Write the low `slot.len()` bytes of `value`, little-endian
fn write_le(slot: &mut [u8], value: u64) {
    match slot.len() {
        1 => slot[0] = value as u8,
        2 => LittleEndian::write_u16(slot, value as u16),
        4 => LittleEndian::write_u32(slot, value as u32),
        _ => LittleEndian::write_u64(slot, value),
    }
}
