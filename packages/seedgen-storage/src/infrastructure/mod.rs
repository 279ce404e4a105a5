//! Infrastructure layer - Storage adapters
//!
//! - `fs`: one file per artifact under an output directory
//! - `memory`: in-process store (tests, embedding)

#[cfg(feature = "fs")]
pub mod fs;
pub mod memory;

#[cfg(feature = "fs")]
pub use fs::FsArtifactStore;
pub use memory::InMemoryArtifactStore;
