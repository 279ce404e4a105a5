//! Path enumeration strategies

mod single_flip;

pub use single_flip::SingleFlipEnumerator;
