//! `movieshelf search <title>` – show enriched catalog matches.

use anyhow::{Context, Result};
use movieshelf_core::catalog::Catalog;
use movieshelf_core::enrich::{EnrichError, EnrichmentPipeline, SearchOutcome};
use movieshelf_core::record::DisplayRecord;

use super::interrupt::{Interrupt, Interrupted};

pub async fn run_search<C: Catalog + 'static>(
    pipeline: &EnrichmentPipeline<C>,
    title: &str,
) -> Result<()> {
    let interrupt = Interrupt::listen();
    match search_interruptible(pipeline, title, &interrupt).await? {
        SearchOutcome::NoMatches => println!("No movies found."),
        SearchOutcome::Choices(choices) => print!("{}", format_choices(&choices)),
    }
    Ok(())
}

/// Run a search that Ctrl-C cancels with [`Interrupted`].
pub(super) async fn search_interruptible<C: Catalog + 'static>(
    pipeline: &EnrichmentPipeline<C>,
    title: &str,
    interrupt: &Interrupt,
) -> Result<SearchOutcome> {
    let ticket = pipeline.control().begin();
    let res = tokio::select! {
        biased;
        _ = interrupt.fired() => {
            ticket.cancel();
            return Err(Interrupted.into());
        }
        res = pipeline.search_with_ticket(title, &ticket) => res,
    };

    match res {
        Err(EnrichError::Cancelled) => anyhow::bail!("search for {:?} cancelled", title),
        other => other.with_context(|| format!("search for {:?} failed", title)),
    }
}

/// Numbered choice list: label line plus director and cast.
pub(super) fn format_choices(choices: &[DisplayRecord]) -> String {
    let mut out = String::new();
    for (i, record) in choices.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, record.label()));
        out.push_str(&format!("    Director: {}\n", record.director));
        if !record.main_actors.is_empty() {
            out.push_str(&format!("    Main actors: {}\n", record.main_actors));
        }
    }
    out
}

/// Clap value parser for titles: trimmed, never blank.
pub fn parse_title(raw: &str) -> std::result::Result<String, String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err("title must not be blank".to_string());
    }
    Ok(title.to_string())
}
