use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Error type for document store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document {path} is missing or unreadable; run `dp init` first")]
    NotInitialized { path: PathBuf },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not serialize {path}: {source}")]
    SerializeError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// An item that lives in a JSON document: it carries a unique id and can be
/// built from an id-less draft when the store assigns one.
pub trait Stored: Serialize + DeserializeOwned + Clone {
    type Draft;

    /// Attach a freshly generated id to a draft.
    fn from_draft(draft: Self::Draft, id: String) -> Self;

    /// The item's unique id.
    fn id(&self) -> &str;
}

/// One JSON document holding the entire collection for a single item kind.
///
/// Every mutation is a whole-document read-modify-write cycle: load the full
/// collection, apply one change, write the full collection back. The cycle
/// runs under an in-process mutex held from read through write, so two
/// concurrent mutations on the same document cannot lose an update to each
/// other. Writes go through a temp file and rename, so a reader never
/// observes a partial document.
pub struct JsonDocument<T> {
    path: PathBuf,
    gate: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T: Stored> JsonDocument<T> {
    pub fn new(path: PathBuf) -> Self {
        JsonDocument {
            path,
            gate: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document. A missing file and an unparsable file
    /// both read as `None`: "not yet initialized".
    pub fn load(&self) -> Option<Vec<T>> {
        let _gate = self.gate.lock().unwrap();
        self.read()
    }

    /// Establish an empty document if loading fails, and return whatever
    /// collection is now on disk.
    pub fn initialize_if_absent(&self) -> Result<Vec<T>, StoreError> {
        let _gate = self.gate.lock().unwrap();
        if let Some(items) = self.read() {
            return Ok(items);
        }
        self.write(&[])?;
        Ok(Vec::new())
    }

    /// Append a new item with a freshly assigned id and return it.
    pub fn add(&self, draft: T::Draft) -> Result<T, StoreError> {
        let _gate = self.gate.lock().unwrap();
        let mut items = self.read().ok_or_else(|| self.not_initialized())?;
        let item = T::from_draft(draft, Uuid::new_v4().to_string());
        items.push(item.clone());
        self.write(&items)?;
        Ok(item)
    }

    /// Replace the item carrying the same id (append when absent) and return
    /// the post-update collection.
    pub fn update(&self, item: T) -> Result<Vec<T>, StoreError> {
        let _gate = self.gate.lock().unwrap();
        let mut items = self.read().ok_or_else(|| self.not_initialized())?;
        items.retain(|existing| existing.id() != item.id());
        items.push(item);
        self.write(&items)?;
        Ok(items)
    }

    /// Drop the item with the given id (a no-op when absent) and return the
    /// post-removal collection.
    pub fn remove(&self, id: &str) -> Result<Vec<T>, StoreError> {
        let _gate = self.gate.lock().unwrap();
        let mut items = self.read().ok_or_else(|| self.not_initialized())?;
        items.retain(|existing| existing.id() != id);
        self.write(&items)?;
        Ok(items)
    }

    fn read(&self) -> Option<Vec<T>> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn write(&self, items: &[T]) -> Result<(), StoreError> {
        let content =
            serde_json::to_string_pretty(items).map_err(|e| StoreError::SerializeError {
                path: self.path.clone(),
                source: e,
            })?;
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }

    fn not_initialized(&self) -> StoreError {
        StoreError::NotInitialized {
            path: self.path.clone(),
        }
    }
}

/// Write via a temp file in the same directory, then rename over the target.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
