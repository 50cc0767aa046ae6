//! Directory-backed storage: one JSON file per key.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use fs2::FileExt;

use super::{KeyValueBackend, StorageError};

const LOCK_FILE: &str = ".lock";

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go through a temp file renamed into place under an exclusive
/// advisory lock, so another process polling the same directory never
/// reads a half-written blob.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory: `<data_dir>/pairchat`.
    pub fn default_dir() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("pairchat")
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    fn lock(&self, exclusive: bool) -> Result<DirLock, StorageError> {
        let path = self.dir.join(LOCK_FILE);
        let map_err = |source| StorageError::Lock {
            path: path.clone(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(map_err)?;
        if exclusive {
            FileExt::lock_exclusive(&file).map_err(map_err)?;
        } else {
            FileExt::lock_shared(&file).map_err(map_err)?;
        }
        Ok(DirLock { file })
    }
}

/// Held advisory lock, released on drop.
struct DirLock {
    file: File,
}

impl Drop for DirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl KeyValueBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            return Ok(None);
        }
        let _lock = self.lock(false)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let _lock = self.lock(true)?;

        let tmp = self
            .dir
            .join(format!(".{key}.json.tmp-{}", std::process::id()));
        let write = || -> std::io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(blob.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };
        write().map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StorageError::Write {
                path: path.clone(),
                source,
            }
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if !self.dir.exists() {
            return Ok(());
        }
        let _lock = self.lock(true)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove { path, source }),
        }
    }
}
