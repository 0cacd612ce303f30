//! `movieshelf remove <id>` / `movieshelf remove --title <title>`.

use anyhow::{Context, Result};
use movieshelf_core::library::{LibraryStore, StorageBackend};

/// What to remove. Title removal drops every record with that exact title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    Id(u64),
    Title(String),
}

pub fn run_remove<B: StorageBackend>(
    store: &mut LibraryStore<B>,
    target: RemoveTarget,
) -> Result<()> {
    let removed = match &target {
        RemoveTarget::Id(id) => store.remove_by_id(*id),
        RemoveTarget::Title(title) => store.remove_by_title(title),
    }
    .context("update library")?;

    match (removed, &target) {
        (0, RemoveTarget::Id(id)) => println!("No saved movie with id {id}"),
        (0, RemoveTarget::Title(title)) => println!("No saved movie titled {title:?}"),
        (n, _) => println!("Removed {n} movie(s)"),
    }
    Ok(())
}
