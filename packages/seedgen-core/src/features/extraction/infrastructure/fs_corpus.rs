//! Filesystem source corpus
//!
//! Either a single file or a directory tree. Directory trees are walked once
//! at open time; file contents are read on first use and kept in a bounded
//! LRU cache, so a batch over a large tree holds at most a fixed number of
//! files in memory.

use lru::LruCache;
use parking_lot::Mutex;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::body_locator::function_pattern;
use crate::features::extraction::ports::{SourceCorpus, SourceUnit};

/// Default number of file texts kept in memory
pub const DEFAULT_CACHED_FILES: usize = 256;

pub struct FsSourceCorpus {
    root: PathBuf,
    /// Sorted for deterministic candidate order
    files: Vec<PathBuf>,
    cache: Mutex<LruCache<PathBuf, Arc<str>>>,
}

impl FsSourceCorpus {
    /// Open a file or directory
    ///
    /// A single file is used as-is whatever its extension; a directory is
    /// walked recursively keeping files whose extension is in `extensions`.
    pub fn open(root: impl AsRef<Path>, extensions: &[String]) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let metadata = std::fs::metadata(&root)?;

        let files = if metadata.is_file() {
            vec![root.clone()]
        } else {
            Self::discover_files(&root, extensions)
        };

        debug!(root = %root.display(), files = files.len(), "Source corpus opened");

        Ok(Self {
            root,
            files,
            cache: Mutex::new(LruCache::new(cache_capacity(DEFAULT_CACHED_FILES))),
        })
    }

    /// Bound the text cache; 0 is treated as 1
    pub fn with_cache_capacity(self, files: usize) -> Self {
        self.cache.lock().resize(cache_capacity(files));
        self
    }

    fn discover_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable corpus entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            let matches_ext = entry
                .path()
                .extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy();
                    extensions.iter().any(|want| want.eq_ignore_ascii_case(&ext))
                })
                .unwrap_or(false);
            if matches_ext {
                files.push(entry.into_path());
            }
        }

        files.sort();
        files
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn cached_files(&self) -> usize {
        self.cache.lock().len()
    }

    /// Cached file text; invalid UTF-8 is replaced, unreadable files yield `None`
    fn text(&self, path: &Path) -> Option<Arc<str>> {
        if let Some(text) = self.cache.lock().get(path) {
            return Some(Arc::clone(text));
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read source file");
                return None;
            }
        };
        let text: Arc<str> = String::from_utf8_lossy(&bytes).into();
        self.cache.lock().put(path.to_path_buf(), Arc::clone(&text));
        Some(text)
    }
}

fn cache_capacity(files: usize) -> NonZeroUsize {
    NonZeroUsize::new(files).unwrap_or(NonZeroUsize::MIN)
}

impl SourceCorpus for FsSourceCorpus {
    fn candidates(&self, function: &str) -> Vec<SourceUnit> {
        let Some(pattern) = function_pattern(function) else {
            return Vec::new();
        };

        self.files
            .iter()
            .filter_map(|path| {
                let text = self.text(path)?;
                pattern
                    .is_match(&text)
                    .then(|| SourceUnit::new(path.display().to_string(), text))
            })
            .collect()
    }
}
