//! Read-only client for the remote movie catalog (TMDB-style REST API).
//!
//! Four queries: title search, details, credits and videos. Every response
//! must be HTTP 200 with a JSON body; anything else is a [`CatalogError`].

mod client;
mod endpoint;
mod error;
pub mod types;

pub use client::CatalogClient;
pub use endpoint::CatalogEndpoints;
pub use error::CatalogError;
pub use types::{
    CastMember, CreditsRecord, CrewMember, DetailsRecord, SearchCandidate, SearchResultSet,
    Video, VideosRecord,
};

/// The catalog queries the enrichment pipeline needs.
///
/// Calls block the current thread; async callers go through `spawn_blocking`.
pub trait Catalog: Send + Sync {
    /// Search movies by free-text title.
    fn search(&self, query: &str) -> Result<SearchResultSet, CatalogError>;

    fn movie_details(&self, id: u64) -> Result<DetailsRecord, CatalogError>;

    fn movie_credits(&self, id: u64) -> Result<CreditsRecord, CatalogError>;

    fn movie_videos(&self, id: u64) -> Result<VideosRecord, CatalogError>;
}
