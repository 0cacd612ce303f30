//! Display records and the saved library.
//!
//! The JSON shape (field names, "N/A" marker) matches snapshots written by
//! earlier versions of the bookmarking page, so existing libraries load as-is.

use serde::{Deserialize, Serialize};

/// Marker stored in place of a poster, director or trailer the catalog did not have.
pub const NOT_AVAILABLE: &str = "N/A";

/// Returns true unless `value` is the [`NOT_AVAILABLE`] marker.
pub fn is_available(value: &str) -> bool {
    value != NOT_AVAILABLE
}

/// One enriched movie, flattened for display and storage.
///
/// Records are never edited in place; the library only appends and filters them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub title: String,
    /// First four characters of the release date (may be empty or odd for bad dates).
    pub year: String,
    /// Catalog identifier.
    pub id: u64,
    /// Absolute poster URL or [`NOT_AVAILABLE`].
    pub poster: String,
    /// Director name or [`NOT_AVAILABLE`].
    pub director: String,
    /// Up to three billed cast names joined with ", " (empty when none).
    #[serde(rename = "mainActors")]
    pub main_actors: String,
    /// Absolute trailer URL or [`NOT_AVAILABLE`].
    pub trailer: String,
}

impl DisplayRecord {
    /// "Title (Year)" label used for choices and listings.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }

    pub fn poster_url(&self) -> Option<&str> {
        Some(self.poster.as_str()).filter(|p| is_available(p))
    }

    pub fn trailer_url(&self) -> Option<&str> {
        Some(self.trailer.as_str()).filter(|t| is_available(t))
    }
}

/// Ordered collection of saved records. Insertion order is kept and
/// duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    records: Vec<DisplayRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DisplayRecord) {
        self.records.push(record);
    }

    /// Keeps records for which `keep` returns true; returns how many were dropped.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&DisplayRecord) -> bool,
    {
        let before = self.records.len();
        self.records.retain(keep);
        before - self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[DisplayRecord] {
        &self.records
    }
}

impl From<Vec<DisplayRecord>> for Library {
    fn from(records: Vec<DisplayRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for Library {
    type Item = DisplayRecord;
    type IntoIter = std::vec::IntoIter<DisplayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a DisplayRecord;
    type IntoIter = std::slice::Iter<'a, DisplayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
