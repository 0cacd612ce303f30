//! Fan-out / join-all enrichment of one search.

use std::sync::Arc;
use tokio::task::JoinSet;

use super::control::{SearchControl, SearchTicket};
use super::reduce::{reduce, LinkTemplates, MovieLookup};
use super::{EnrichError, SearchOutcome};
use crate::catalog::{Catalog, CatalogError};
use crate::record::DisplayRecord;

/// Turns a free-text title into enriched [`DisplayRecord`] choices.
///
/// Every candidate gets its own task; inside it details, credits and videos
/// are fetched concurrently. There is no concurrency cap. The first failing
/// lookup aborts the whole batch.
pub struct EnrichmentPipeline<C> {
    catalog: Arc<C>,
    links: LinkTemplates,
    control: SearchControl,
}

impl<C> std::fmt::Debug for EnrichmentPipeline<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnrichmentPipeline")
            .field("links", &self.links)
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}

impl<C> EnrichmentPipeline<C>
where
    C: Catalog + 'static,
{
    pub fn new(catalog: Arc<C>, links: LinkTemplates) -> Self {
        Self {
            catalog,
            links,
            control: SearchControl::new(),
        }
    }

    pub fn control(&self) -> &SearchControl {
        &self.control
    }

    /// Start a search that supersedes any search still running on this pipeline.
    pub async fn search(&self, title: &str) -> Result<SearchOutcome, EnrichError> {
        let ticket = self.control.begin();
        self.search_with_ticket(title, &ticket).await
    }

    /// Run a search under a ticket obtained from [`SearchControl::begin`].
    pub async fn search_with_ticket(
        &self,
        title: &str,
        ticket: &SearchTicket,
    ) -> Result<SearchOutcome, EnrichError> {
        let generation = ticket.generation();
        tracing::info!(generation, title, "search started");

        let catalog = Arc::clone(&self.catalog);
        let query = title.to_string();
        let results = tokio::select! {
            biased;
            _ = ticket.cancelled() => return Err(self.cancelled(generation)),
            res = blocking(move || catalog.search(&query)) => res?,
        };

        if results.is_empty() {
            tracing::info!(generation, title, "no matches");
            return Ok(SearchOutcome::NoMatches);
        }

        let count = results.results.len();
        let mut tasks = JoinSet::new();
        for (index, candidate) in results.results.into_iter().enumerate() {
            let catalog = Arc::clone(&self.catalog);
            let links = self.links.clone();
            tasks.spawn(async move {
                let lookup = lookup_movie(catalog, candidate.id).await?;
                Ok::<_, EnrichError>((index, reduce(&candidate, &lookup, &links)))
            });
        }

        let mut slots: Vec<Option<DisplayRecord>> = vec![None; count];
        loop {
            let joined = tokio::select! {
                biased;
                _ = ticket.cancelled() => {
                    tasks.abort_all();
                    return Err(self.cancelled(generation));
                }
                joined = tasks.join_next() => joined,
            };
            let Some(joined) = joined else {
                break;
            };
            match joined {
                Ok(Ok((index, record))) => slots[index] = Some(record),
                Ok(Err(err)) => {
                    tasks.abort_all();
                    tracing::warn!(generation, "search failed: {}", err);
                    return Err(err);
                }
                Err(err) => {
                    tasks.abort_all();
                    return Err(EnrichError::Join(err));
                }
            }
        }

        if ticket.is_cancelled() {
            return Err(self.cancelled(generation));
        }

        let choices: Vec<DisplayRecord> = slots.into_iter().flatten().collect();
        tracing::info!(generation, count = choices.len(), "search finished");
        Ok(SearchOutcome::Choices(choices))
    }

    fn cancelled(&self, generation: u64) -> EnrichError {
        tracing::warn!(generation, "search cancelled");
        EnrichError::Cancelled
    }
}

/// Details, credits and videos for one movie, fetched concurrently.
async fn lookup_movie<C>(catalog: Arc<C>, id: u64) -> Result<MovieLookup, EnrichError>
where
    C: Catalog + 'static,
{
    let (details, credits, videos) = tokio::try_join!(
        blocking({
            let catalog = Arc::clone(&catalog);
            move || catalog.movie_details(id)
        }),
        blocking({
            let catalog = Arc::clone(&catalog);
            move || catalog.movie_credits(id)
        }),
        blocking(move || catalog.movie_videos(id)),
    )?;
    Ok(MovieLookup {
        details,
        credits,
        videos,
    })
}

/// Run a blocking catalog call on the blocking pool.
async fn blocking<T, F>(call: F) -> Result<T, EnrichError>
where
    F: FnOnce() -> Result<T, CatalogError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(call).await??)
}
