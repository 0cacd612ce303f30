//! `movieshelf list` – show the saved library.

use anyhow::Result;
use movieshelf_core::library::{LibraryStore, StorageBackend};
use movieshelf_core::record::DisplayRecord;

pub fn run_list<B: StorageBackend>(store: &LibraryStore<B>) -> Result<()> {
    let library = store.list();
    if library.is_empty() {
        println!("Library is empty.");
        return Ok(());
    }
    for record in library {
        print!("{}", render_record(record));
    }
    Ok(())
}

/// Trailer and poster lines are omitted when the catalog had none.
fn render_record(record: &DisplayRecord) -> String {
    let mut out = format!("{}  [id {}]\n", record.label(), record.id);
    out.push_str(&format!("  Director: {}\n", record.director));
    out.push_str(&format!("  Main actors: {}\n", record.main_actors));
    if let Some(trailer) = record.trailer_url() {
        out.push_str(&format!("  Trailer: {}\n", trailer));
    }
    if let Some(poster) = record.poster_url() {
        out.push_str(&format!("  Poster: {}\n", poster));
    }
    out
}
