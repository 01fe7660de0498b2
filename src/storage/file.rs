use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tempfile::NamedTempFile;

use crate::domain::{CacheEntry, FeedItem};
use crate::errors::NewsdeskResult;
use crate::storage::clock::Clock;
use crate::storage::traits::FeedCache;

/// Cache kept in a JSON file so it outlives a single run. Writes go to a temp file in
/// the same directory and are renamed over the old one.
pub struct FileFeedCache {
    path: PathBuf,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl FileFeedCache {
    pub fn new<P: AsRef<Path>>(path: P, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ttl,
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entry(&self) -> NewsdeskResult<Option<CacheEntry>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn write_entry(&self, entry: &CacheEntry) -> NewsdeskResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer(&mut file, entry)?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }

    fn remove(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), "could not remove cache file: {}", e),
        }
    }
}

impl FeedCache for FileFeedCache {
    fn get(&self) -> Option<CacheEntry> {
        let entry = match self.read_entry() {
            Ok(entry) => entry?,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable cache file: {}", e);
                self.remove();
                return None;
            }
        };

        if entry.is_expired(self.clock.now(), self.ttl) {
            tracing::debug!(fetched_at = %entry.fetched_at, "cached feed expired");
            self.remove();
            return None;
        }

        Some(entry)
    }

    fn put(&self, items: Vec<FeedItem>) {
        let entry = CacheEntry::new(items, self.clock.now());
        if let Err(e) = self.write_entry(&entry) {
            tracing::warn!(path = %self.path.display(), "could not write cache file: {}", e);
        }
    }

    fn clear(&self) {
        self.remove();
    }
}
