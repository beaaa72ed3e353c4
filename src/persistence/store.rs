//! Durable snapshot slots.
//!
//! A `SnapshotStore` is a tiny key-value store holding serialized session
//! states. Any medium works; two are provided:
//!
//! - `MemorySnapshotStore`: process-local, for tests and embedding
//! - `FileSnapshotStore`: one JSON file per slot under a directory
//!
//! Writes never gate a mutation. The session manager routes every
//! storage result through [`best_effort`], which logs and drops failures.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::warn;

/// Storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("snapshot could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid snapshot key {0:?}")]
    InvalidKey(String),
}

/// Named slots holding serialized snapshots.
pub trait SnapshotStore: Send + Sync {
    /// Read a slot. `Ok(None)` when it was never written or was cleared.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    fn save(&self, key: &str, snapshot: &str) -> Result<(), StorageError>;

    /// Empty a slot. Clearing an empty slot succeeds.
    fn clear(&self, key: &str) -> Result<(), StorageError>;
}

/// Log and discard a storage failure.
///
/// The in-memory state stays authoritative for the running session, so a
/// failed write or clear is reported and otherwise ignored.
pub fn best_effort(operation: &str, result: Result<(), StorageError>) {
    if let Err(error) = result {
        warn!(operation, %error, "snapshot storage failed; continuing with in-memory state");
    }
}

/// In-process snapshot store.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slots: Mutex<FxHashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemorySnapshotStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `save`/`clear` calls fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Read a slot directly, bypassing the trait.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    fn slots(&self) -> Result<std::sync::MutexGuard<'_, FxHashMap<String, String>>, StorageError> {
        self.slots
            .lock()
            .map_err(|_| StorageError::Unavailable("lock poisoned".to_string()))
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.slots()?.insert(key.to_string(), snapshot.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.slots()?.remove(key);
        Ok(())
    }
}

/// Snapshot store writing `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    /// Store slots under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // Keys name a file directly under `dir`; separators and dot names are refused.
    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key == "." || key == ".." || key.contains(&['/', '\\', '\0'][..]) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written slot.
        let tmp = path.with_extension("json.tmp");
        let written = fs::write(&tmp, snapshot).and_then(|()| fs::rename(&tmp, &path));
        if let Err(error) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(path = %tmp.display(), error = %cleanup, "could not remove temporary snapshot");
                }
            }
            return Err(error.into());
        }
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.slot_path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
