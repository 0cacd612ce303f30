//! CLI for the movieshelf bookmarking tool.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use movieshelf_core::catalog::CatalogClient;
use movieshelf_core::config::{self, ShelfConfig};
use movieshelf_core::enrich::{EnrichmentPipeline, LinkTemplates};
use movieshelf_core::library::{FileStorage, LibraryStore};
use std::sync::Arc;

use commands::{
    parse_title, run_add, run_completions, run_list, run_manpage, run_remove, run_search,
    RemoveTarget,
};

pub use commands::{Interrupted, EXIT_INTERRUPTED};

/// Top-level CLI for movieshelf.
#[derive(Debug, Parser)]
#[command(name = "movieshelf")]
#[command(about = "Search a movie catalog and keep a local list of movies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Search the catalog by title and show enriched results.
    Search {
        /// Movie title to search for.
        #[arg(value_parser = parse_title)]
        title: String,
    },

    /// Search by title and save one of the results to the library.
    Add {
        /// Movie title to search for.
        #[arg(value_parser = parse_title)]
        title: String,
        /// Save the Nth result (1-based) instead of prompting.
        #[arg(long, value_name = "N")]
        pick: Option<usize>,
    },

    /// Show the saved library.
    List,

    /// Remove saved movies by catalog id, or by exact title with --title.
    Remove {
        /// Catalog id of the movie to remove.
        #[arg(required_unless_present = "title", conflicts_with = "title")]
        id: Option<u64>,
        /// Remove every saved movie with exactly this title.
        #[arg(long)]
        title: Option<String>,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff).
    Manpage,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Manpage => return run_manpage(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", redacted(&cfg));
        cli.command.run(&cfg).await
    }

    /// Run a command that needs configuration. Only the library commands
    /// touch the library directory.
    pub async fn run(self, cfg: &ShelfConfig) -> Result<()> {
        match self {
            CliCommand::Search { title } => run_search(&pipeline(cfg)?, &title).await?,
            CliCommand::Add { title, pick } => {
                let pipeline = pipeline(cfg)?;
                let mut store = open_store(cfg)?;
                run_add(&pipeline, &mut store, &title, pick).await?
            }
            CliCommand::List => run_list(&open_store(cfg)?)?,
            CliCommand::Remove { id, title } => {
                let target = match (id, title) {
                    (_, Some(title)) => RemoveTarget::Title(title),
                    (Some(id), None) => RemoveTarget::Id(id),
                    (None, None) => anyhow::bail!("remove needs an id or --title"),
                };
                run_remove(&mut open_store(cfg)?, target)?
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

fn open_store(cfg: &ShelfConfig) -> Result<LibraryStore<FileStorage>> {
    let library_dir = cfg.library_dir()?;
    LibraryStore::open(FileStorage::new(&library_dir))
        .with_context(|| format!("open library in {}", library_dir.display()))
}

fn pipeline(cfg: &ShelfConfig) -> Result<EnrichmentPipeline<CatalogClient>> {
    let client = CatalogClient::from_config(cfg)?;
    Ok(EnrichmentPipeline::new(
        Arc::new(client),
        LinkTemplates::from_config(cfg),
    ))
}

/// Config copy safe to log.
fn redacted(cfg: &ShelfConfig) -> ShelfConfig {
    let mut cfg = cfg.clone();
    if cfg.api_key.is_some() {
        cfg.api_key = Some("<redacted>".to_string());
    }
    cfg
}

#[cfg(test)]
mod tests;
