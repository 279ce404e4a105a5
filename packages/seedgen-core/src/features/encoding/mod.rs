//! Input Encoding
//!
//! Solved assignment + function manifest -> little-endian byte buffer.

pub mod domain;
pub mod infrastructure;

pub use domain::{EncodedInput, SlotKind, SlotLayout};
pub use infrastructure::{
    InputEncoder, DEFAULT_CAPACITY, DEFAULT_MIN_LEN, DEFAULT_PLACEHOLDER_WIDTH,
};
