//! File-backed key-value store.
//!
//! All keys live in one JSON object (`{"shophub-cart": "[...]", ...}`) whose
//! values are the raw stored strings. The file is read once on open and
//! rewritten in full on every change, via a uniquely named sibling temp file
//! that is renamed over the store. Concurrent writers never share a temp file,
//! and a failed write removes its temp file.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

/// Key-value store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store; the file and its parent directory
    /// are created on first write. A file that is not a JSON object of
    /// strings is logged and treated as empty, and is replaced on the next
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if an existing file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).unwrap_or_else(|e| {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Store file is unreadable, starting empty"
                    );
                    BTreeMap::new()
                })
            }
        } else {
            tracing::debug!(path = %path.display(), "Store file does not exist yet");
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let content = serde_json::to_vec_pretty(&self.entries)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("shophub-cart", "[]").unwrap();
        store.set("shophub-user", r#"{"email":"a@b.c","name":"a"}"#).unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("shophub-cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(
            reopened.get("shophub-user").unwrap().as_deref(),
            Some(r#"{"email":"a@b.c","name":"a"}"#)
        );
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("shophub-user", "{}").unwrap();
        store.remove("shophub-user").unwrap();
        store.remove("never-set").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("shophub-user").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("shophub-cart").unwrap(), None);

        store.set("shophub-cart", "[]").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("shophub-cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("storage.json")]);
    }

    #[test]
    fn test_concurrent_writers_leave_a_readable_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let writers: Vec<_> = (0..4)
            .map(|n| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut store = FileStore::open(&path).unwrap();
                    for i in 0..25 {
                        store.set(&format!("writer-{n}"), &"x".repeat(i * 40)).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert!(!entries.is_empty());

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("storage.json")]);
    }
}
