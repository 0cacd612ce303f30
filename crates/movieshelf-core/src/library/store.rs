//! The library store: load, append, filter, rewrite.

use super::{StorageBackend, StoreError};
use crate::record::{DisplayRecord, Library};

/// Fixed key the library snapshot lives under.
pub const LIBRARY_KEY: &str = "movies";

/// Owns the in-memory library and its backend. Every mutation rewrites the
/// whole snapshot; the in-memory copy only changes once the write succeeded.
#[derive(Debug)]
pub struct LibraryStore<B> {
    backend: B,
    key: String,
    library: Library,
}

impl<B: StorageBackend> LibraryStore<B> {
    /// Open the library under [`LIBRARY_KEY`], loading the current snapshot.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        Self::open_with_key(backend, LIBRARY_KEY)
    }

    pub fn open_with_key(backend: B, key: &str) -> Result<Self, StoreError> {
        let mut store = Self {
            backend,
            key: key.to_string(),
            library: Library::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// Re-read the persisted snapshot. A missing or blank value is an empty library.
    pub fn load(&mut self) -> Result<&Library, StoreError> {
        self.library = match self.backend.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                    key: self.key.clone(),
                    source,
                })?
            }
            _ => Library::new(),
        };
        tracing::debug!(key = %self.key, count = self.library.len(), "library loaded");
        Ok(&self.library)
    }

    /// Append a record and persist.
    pub fn add(&mut self, record: DisplayRecord) -> Result<(), StoreError> {
        let mut next = self.library.clone();
        tracing::info!(id = record.id, title = %record.title, "adding to library");
        next.push(record);
        self.commit(next)
    }

    /// Remove every record whose title equals `title` exactly (case-sensitive).
    /// Returns how many records were removed.
    pub fn remove_by_title(&mut self, title: &str) -> Result<usize, StoreError> {
        let mut next = self.library.clone();
        let removed = next.retain(|r| r.title != title);
        tracing::info!(title, removed, "removing from library by title");
        self.commit(next)?;
        Ok(removed)
    }

    /// Remove every record with catalog id `id`. Returns how many were removed.
    pub fn remove_by_id(&mut self, id: u64) -> Result<usize, StoreError> {
        let mut next = self.library.clone();
        let removed = next.retain(|r| r.id != id);
        tracing::info!(id, removed, "removing from library by id");
        self.commit(next)?;
        Ok(removed)
    }

    /// Current library in insertion order.
    pub fn list(&self) -> &Library {
        &self.library
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn commit(&mut self, next: Library) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&next).map_err(StoreError::Serialize)?;
        self.backend.set(&self.key, &raw)?;
        self.library = next;
        Ok(())
    }
}
