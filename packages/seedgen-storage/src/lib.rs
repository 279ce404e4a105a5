//! ArtifactStore - persisted concolic test inputs
//!
//! ## Core Principles
//!
//! 1. **Deterministic Identity**: `artifact_id = (function, path_index)`
//! 2. **Write-Once**: artifacts are immutable once created
//! 3. **All-or-Nothing Writes**: temp file + rename, never a partial artifact
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seedgen_storage::{Artifact, ArtifactId, ArtifactStore, FsArtifactStore};
//!
//! let store = FsArtifactStore::open("concolic_inputs")?;
//! let id = ArtifactId::new("Ip4PreProcessPacket", 0)?;
//! let record = store.put(&Artifact::new(id, bytes))?;
//! println!("{} ({} bytes)", record.location, record.len);
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{ErrorKind, Result, StorageError};

pub use domain::{Artifact, ArtifactId, ArtifactRecord, ArtifactStore};
#[cfg(feature = "fs")]
pub use infrastructure::FsArtifactStore;
pub use infrastructure::InMemoryArtifactStore;
