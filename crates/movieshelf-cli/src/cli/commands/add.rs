//! `movieshelf add <title> [--pick N]` – search, choose, save.

use anyhow::{Context, Result};
use movieshelf_core::catalog::Catalog;
use movieshelf_core::enrich::{EnrichmentPipeline, SearchOutcome};
use movieshelf_core::library::{LibraryStore, StorageBackend};
use std::future::Future;
use std::io::{self, BufRead, Write};

use super::interrupt::{Interrupt, Interrupted};
use super::search::{format_choices, search_interruptible};

pub async fn run_add<C, B>(
    pipeline: &EnrichmentPipeline<C>,
    store: &mut LibraryStore<B>,
    title: &str,
    pick: Option<usize>,
) -> Result<()>
where
    C: Catalog + 'static,
    B: StorageBackend,
{
    // One listener for the whole flow, prompt included.
    let interrupt = Interrupt::listen();

    let choices = match search_interruptible(pipeline, title, &interrupt).await? {
        SearchOutcome::NoMatches => {
            println!("No movies found.");
            return Ok(());
        }
        SearchOutcome::Choices(choices) => choices,
    };

    let index = match pick {
        Some(n) => choice_index(n, choices.len())?,
        None => {
            print!("{}", format_choices(&choices));
            print!("Choose a movie [1-{}]: ", choices.len());
            io::stdout().flush()?;
            choose_or_interrupt(choices.len(), read_stdin_line(), &interrupt).await?
        }
    };

    let record = choices[index].clone();
    let label = record.label();
    let id = record.id;
    store.add(record).context("save to library")?;
    println!("Saved {label} [id {id}]");
    Ok(())
}

/// Wait for a choice line, or fail with [`Interrupted`] on Ctrl-C.
async fn choose_or_interrupt<F>(count: usize, read: F, interrupt: &Interrupt) -> Result<usize>
where
    F: Future<Output = io::Result<Option<String>>>,
{
    tokio::select! {
        biased;
        _ = interrupt.fired() => Err(Interrupted.into()),
        line = read => parse_choice(count, line?),
    }
}

/// Blocking stdin read moved off the runtime so Ctrl-C can win the race.
async fn read_stdin_line() -> io::Result<Option<String>> {
    tokio::task::spawn_blocking(|| read_line(&mut io::stdin().lock()))
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

/// One line from `input`; `None` at EOF.
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn parse_choice(count: usize, line: Option<String>) -> Result<usize> {
    let Some(line) = line else {
        anyhow::bail!("no choice entered");
    };
    let n: usize = line
        .trim()
        .parse()
        .with_context(|| format!("not a number: {:?}", line.trim()))?;
    choice_index(n, count)
}

/// 1-based choice number to index, validated against `count`.
fn choice_index(n: usize, count: usize) -> Result<usize> {
    if n == 0 || n > count {
        anyhow::bail!("choice {} is out of range 1-{}", n, count);
    }
    Ok(n - 1)
}
