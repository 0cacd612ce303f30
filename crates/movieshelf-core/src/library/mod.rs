//! Saved library: an ordered list of display records kept as one JSON
//! snapshot under a fixed key in a pluggable key-value backend.

mod backend;
mod error;
mod store;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use error::StoreError;
pub use store::{LibraryStore, LIBRARY_KEY};

#[cfg(test)]
mod tests;
