//! In-memory artifact store

use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::domain::{Artifact, ArtifactId, ArtifactRecord, ArtifactStore};
use crate::{Result, StorageError};

#[derive(Default)]
pub struct InMemoryArtifactStore {
    entries: RwLock<BTreeMap<ArtifactId, (Vec<u8>, ArtifactRecord)>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of a stored artifact
    pub fn get(&self, id: &ArtifactId) -> Option<Vec<u8>> {
        self.entries.read().get(id).map(|(bytes, _)| bytes.clone())
    }

    /// All stored ids, sorted
    pub fn ids(&self) -> Vec<ArtifactId> {
        self.entries.read().keys().cloned().collect()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn put(&self, artifact: &Artifact) -> Result<ArtifactRecord> {
        let mut entries = self.entries.write();
        if entries.contains_key(artifact.id()) {
            return Err(StorageError::already_exists(artifact.id()));
        }
        let record = ArtifactRecord::for_artifact(artifact, format!("mem://{}", artifact.id()));
        entries.insert(
            artifact.id().clone(),
            (artifact.bytes().to_vec(), record.clone()),
        );
        Ok(record)
    }

    fn contains(&self, id: &ArtifactId) -> bool {
        self.entries.read().contains_key(id)
    }

    fn records(&self) -> Vec<ArtifactRecord> {
        self.entries
            .read()
            .values()
            .map(|(_, record)| record.clone())
            .collect()
    }

    fn count(&self) -> usize {
        self.entries.read().len()
    }
}
