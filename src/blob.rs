//! Named blobs read and written wholesale. The history store keeps its
//! whole class list in one of these.

use crate::error::SfResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait BlobStore {
    /// `Ok(None)` when nothing has been written under `key` yet.
    fn read(&self, key: &str) -> SfResult<Option<String>>;
    fn write(&self, key: &str, contents: &str) -> SfResult<()>;
}

/// One `<key>.json` file per blob inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> SfResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, contents: &str) -> SfResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        debug!("Writing {} bytes to {}", contents.len(), path.display());
        fs::write(path, contents)?;
        Ok(())
    }
}

/// Process-local blobs, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(key: &str, contents: &str) -> Self {
        let store = Self::new();
        store
            .blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> SfResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, contents: &str) -> SfResult<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn read(&self, key: &str) -> SfResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, contents: &str) -> SfResult<()> {
        (**self).write(key, contents)
    }
}
