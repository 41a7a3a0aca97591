use crate::error::ErrorCode;
use crate::lock::{LockError, StoreLock};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// How long a writer waits on the store lock before giving up.
const LOCK_TIMEOUT: Duration = Duration::from_secs(2);

/// Store-level failures. Reads that find nothing are `Ok(None)`, not errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("failed to encode store payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    /// Machine-readable code associated with this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io { .. } => ErrorCode::StoreWriteFailed,
            Self::Lock(err) => err.code(),
            Self::Encode(_) => ErrorCode::InternalUnexpected,
        }
    }
}

/// Narrow key-value persistence capability. The collection logic only ever
/// touches storage through this seam, so it is testable without real files.
pub trait KvStore {
    /// Read the raw value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key` in full.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed store: one `<key>.json` file per key under a root directory,
/// writes serialized across processes by an advisory `<key>.lock` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.lock"))
    }
}

impl KvStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io { path, source: err }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|err| StoreError::Io {
            path: self.root.clone(),
            source: err,
        })?;

        let _guard = StoreLock::acquire(&self.lock_path(key), LOCK_TIMEOUT)?;

        // Write-then-rename so readers never observe a half-written slot.
        let path = self.slot_path(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|err| StoreError::Io {
            path: tmp.clone(),
            source: err,
        })?;
        fs::rename(&tmp, &path).map_err(|err| StoreError::Io { path, source: err })
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    slots: HashMap<String, String>,
}

impl MemStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot directly, bypassing the trait. Test convenience.
    pub fn seed(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(key.into(), value.into());
    }
}

impl KvStore for MemStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
