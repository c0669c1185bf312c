//! Key-value stores backing the storage adapter.
//!
//! [`FileStore`] keeps every key in one JSON object on disk and rewrites the
//! file through a temporary sibling, so a batch of writes lands all at once
//! or not at all. [`MemoryStore`] keeps everything in a `HashMap`.

use log::{debug, error, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while writing persisted state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be written or replaced.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but could not be read when the store was opened.
    /// Writing would replace data that was never loaded.
    #[error("refusing to overwrite {path}: it could not be read at startup")]
    Unreadable { path: PathBuf },

    /// State could not be turned into JSON.
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string-to-string store with local-storage semantics.
///
/// Reads never fail; a key that cannot be read is simply absent.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Applies several writes. `Some` sets the key, `None` removes it.
    ///
    /// The default applies them one by one. Implementations that can commit
    /// a batch atomically should override it.
    fn write_batch(&mut self, entries: &[(&str, Option<&str>)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            match value {
                Some(value) => self.set(key, value)?,
                None => self.remove(key)?,
            }
        }
        Ok(())
    }
}

/// In-process store, mostly useful in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as a single JSON object file.
///
/// The file is mirrored in memory. Writes build the new contents first, swap
/// the file in with a rename, and only then update the mirror, so a failed
/// write leaves both the file and the mirror untouched.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    /// Set when the file exists but could not be read; all writes are refused
    read_failed: bool,
}

impl FileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file opens as an empty store. A file holding invalid JSON
    /// opens empty with a warning and is overwritten on the next write. A file
    /// that exists but cannot be read (permissions, invalid UTF-8) also opens
    /// empty, but every write to it is refused with
    /// [`StorageError::Unreadable`].
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut read_failed = false;
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => {
                    debug!(
                        "event=store_open module=storage status=ok path={} keys={}",
                        path.display(),
                        entries.len()
                    );
                    entries
                }
                Err(err) => {
                    warn!(
                        "event=store_open module=storage status=corrupt path={} error={}",
                        path.display(),
                        err
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "event=store_open module=storage status=missing path={}",
                    path.display()
                );
                BTreeMap::new()
            }
            Err(err) => {
                error!(
                    "event=store_open module=storage status=unreadable path={} error={}",
                    path.display(),
                    err
                );
                read_failed = true;
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries,
            read_failed,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// False when the file existed but could not be read at open.
    pub fn is_writable(&self) -> bool {
        !self.read_failed
    }

    fn commit(&mut self, entries: BTreeMap<String, String>) -> Result<(), StorageError> {
        if self.read_failed {
            return Err(StorageError::Unreadable {
                path: self.path.clone(),
            });
        }

        let json = serde_json::to_string_pretty(&entries)?;
        let temp = self.temp_path();

        fs::write(&temp, json).map_err(|source| StorageError::Io {
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;

        self.entries = entries;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_batch(&[(key, Some(value))])
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.write_batch(&[(key, None)])
    }

    fn write_batch(&mut self, entries: &[(&str, Option<&str>)]) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            match value {
                Some(value) => {
                    next.insert(key.to_string(), value.to_string());
                }
                None => {
                    next.remove(*key);
                }
            }
        }
        self.commit(next)
    }
}
