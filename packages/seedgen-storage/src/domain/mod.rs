//! Domain layer for the artifact store
//!
//! # Core Principles
//!
//! 1. **Deterministic Identity**: `artifact_id = (function, path_index)`
//! 2. **Write-Once**: an artifact is never rewritten or mutated after creation
//! 3. **All-or-Nothing**: a write either lands completely or not at all
//!
//! # Domain Models
//!
//! - `ArtifactId`: deterministic name of one solved path's input
//! - `Artifact`: immutable byte buffer bound to its id
//! - `ArtifactRecord`: what the store reports back after a successful write
//!
//! # Port Trait
//!
//! - `ArtifactStore`: primary storage abstraction
//!
//! # Examples
//!
//! ```rust
//! use seedgen_storage::domain::{Artifact, ArtifactId};
//!
//! let id = ArtifactId::new("EfiPxeBcUdpRead", 2).unwrap();
//! assert_eq!(id.file_name(), "EfiPxeBcUdpRead_p2.bin");
//!
//! let artifact = Artifact::new(id, vec![0u8; 1024]);
//! assert_eq!(artifact.len(), 1024);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::{Result, StorageError};

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// Deterministic artifact identity
///
/// The same `(function, path_index)` pair always maps to the same file name,
/// so sequential and parallel runs produce identical artifact sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId {
    /// Function the input targets
    pub function: String,
    /// Index of the execution path within that function's enumeration
    pub path_index: usize,
}

impl ArtifactId {
    /// Create an artifact id
    ///
    /// Rejects names that cannot be used as a single path component.
    pub fn new(function: impl Into<String>, path_index: usize) -> Result<Self> {
        let function = function.into();
        if function.is_empty() {
            return Err(StorageError::invalid_id("function name is empty"));
        }
        if function == "." || function == ".." {
            return Err(StorageError::invalid_id(format!(
                "function name '{}' is not a file name",
                function
            )));
        }
        if function
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0')
        {
            return Err(StorageError::invalid_id(format!(
                "function name '{}' contains a path separator",
                function
            )));
        }
        Ok(Self {
            function,
            path_index,
        })
    }

    /// File name used by filesystem stores: `<function>_p<index>.bin`
    pub fn file_name(&self) -> String {
        format!("{}_p{}.bin", self.function, self.path_index)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_p{}", self.function, self.path_index)
    }
}

/// Immutable binary test input
///
/// Fields are private: once built, neither the id nor the bytes change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    id: ArtifactId,
    bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(id: ArtifactId, bytes: Vec<u8>) -> Self {
        Self { id, bytes }
    }

    pub fn id(&self) -> &ArtifactId {
        &self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hex-encoded SHA-256 of the contents
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(&self.bytes);
        hash.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Record of a completed write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    pub id: ArtifactId,
    /// Store-specific location (file path for filesystem stores)
    pub location: String,
    pub len: usize,
    /// Hex SHA-256 of the written bytes
    pub sha256: String,
    pub written_at: DateTime<Utc>,
}

impl ArtifactRecord {
    pub fn for_artifact(artifact: &Artifact, location: impl Into<String>) -> Self {
        Self {
            id: artifact.id().clone(),
            location: location.into(),
            len: artifact.len(),
            sha256: artifact.digest(),
            written_at: Utc::now(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Artifact store abstraction
///
/// Implementations must be safe to share across worker threads: the batch
/// orchestrator may persist artifacts for different functions concurrently.
pub trait ArtifactStore: Send + Sync {
    /// Persist an artifact. Fails with `AlreadyExists` if the id was written before.
    fn put(&self, artifact: &Artifact) -> Result<ArtifactRecord>;

    /// Whether the id has been written through this store
    fn contains(&self, id: &ArtifactId) -> bool;

    /// Records of every artifact written, sorted by id
    fn records(&self) -> Vec<ArtifactRecord>;

    /// Number of artifacts written
    fn count(&self) -> usize {
        self.records().len()
    }
}
