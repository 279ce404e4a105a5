//! Filesystem artifact store
//!
//! Each artifact becomes `<dir>/<function>_p<index>.bin`. Writes go through a
//! temporary file in the same directory and are renamed into place, so a crash
//! mid-write never leaves a truncated artifact behind.
//!
//! Write-once is enforced per store instance. A file left over from an earlier
//! run under the same name is replaced by the rename.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{Artifact, ArtifactId, ArtifactRecord, ArtifactStore};
use crate::{Result, StorageError};

#[derive(Default)]
struct Ledger {
    written: BTreeMap<ArtifactId, ArtifactRecord>,
    /// Ids reserved by an in-flight write
    pending: HashSet<ArtifactId>,
}

pub struct FsArtifactStore {
    dir: PathBuf,
    ledger: Mutex<Ledger>,
}

impl FsArtifactStore {
    /// Open (and create if needed) an output directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StorageError::io(format!(
                "cannot create output directory {}: {}",
                dir.display(),
                e
            ))
            .with_source(e)
        })?;
        Ok(Self {
            dir,
            ledger: Mutex::new(Ledger::default()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path an artifact id maps to
    pub fn path_for(&self, id: &ArtifactId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    fn reserve(&self, id: &ArtifactId) -> Result<()> {
        let mut ledger = self.ledger.lock();
        if ledger.written.contains_key(id) || ledger.pending.contains(id) {
            return Err(StorageError::already_exists(id));
        }
        ledger.pending.insert(id.clone());
        Ok(())
    }

    fn write_atomic(&self, artifact: &Artifact) -> Result<PathBuf> {
        let target = self.path_for(artifact.id());
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(artifact.bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target)?;
        Ok(target)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn put(&self, artifact: &Artifact) -> Result<ArtifactRecord> {
        let id = artifact.id().clone();
        self.reserve(&id)?;

        let written = self.write_atomic(artifact);

        let mut ledger = self.ledger.lock();
        ledger.pending.remove(&id);
        let path = written?;

        let record = ArtifactRecord::for_artifact(artifact, path.display().to_string());
        debug!("artifact written: {} ({} bytes)", path.display(), record.len);
        ledger.written.insert(id, record.clone());
        Ok(record)
    }

    fn contains(&self, id: &ArtifactId) -> bool {
        self.ledger.lock().written.contains_key(id)
    }

    fn records(&self) -> Vec<ArtifactRecord> {
        self.ledger.lock().written.values().cloned().collect()
    }

    fn count(&self) -> usize {
        self.ledger.lock().written.len()
    }
}
