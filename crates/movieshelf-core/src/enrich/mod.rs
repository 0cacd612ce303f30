//! Enrichment pipeline: title search, per-candidate lookups, reduction.

mod control;
mod pipeline;
mod reduce;

pub use control::{SearchControl, SearchTicket};
pub use pipeline::EnrichmentPipeline;
pub use reduce::{reduce, LinkTemplates, MovieLookup};

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::record::DisplayRecord;

/// Why a search produced no choices.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// A catalog call failed; the whole batch is dropped.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cancelled, either directly or by a newer search.
    #[error("search was cancelled or superseded by a newer search")]
    Cancelled,

    /// A lookup worker panicked or was aborted.
    #[error("catalog lookup task failed")]
    Join(#[from] tokio::task::JoinError),
}

/// Result of a completed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The catalog had nothing for this title.
    NoMatches,
    /// Enriched choices in catalog search order.
    Choices(Vec<DisplayRecord>),
}

impl SearchOutcome {
    pub fn into_choices(self) -> Vec<DisplayRecord> {
        match self {
            SearchOutcome::NoMatches => Vec::new(),
            SearchOutcome::Choices(choices) => choices,
        }
    }
}
