//! Flatten one candidate plus its lookups into a [`DisplayRecord`].

use crate::catalog::{CreditsRecord, DetailsRecord, SearchCandidate, VideosRecord};
use crate::config::ShelfConfig;
use crate::record::{DisplayRecord, NOT_AVAILABLE};

const DIRECTOR_JOB: &str = "Director";
const TRAILER_TYPE: &str = "Trailer";
const TRAILER_SITE: &str = "YouTube";
const MAIN_ACTOR_COUNT: usize = 3;

/// The three per-movie lookups; all must complete before reduction.
#[derive(Debug, Clone, Default)]
pub struct MovieLookup {
    pub details: DetailsRecord,
    pub credits: CreditsRecord,
    pub videos: VideosRecord,
}

/// URL prefixes used to turn catalog paths and video keys into absolute links.
#[derive(Debug, Clone)]
pub struct LinkTemplates {
    pub image_base_url: String,
    pub poster_size: String,
    pub video_watch_url: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self::from_config(&ShelfConfig::default())
    }
}

impl LinkTemplates {
    pub fn from_config(cfg: &ShelfConfig) -> Self {
        Self {
            image_base_url: cfg.image_base_url.clone(),
            poster_size: cfg.poster_size.clone(),
            video_watch_url: cfg.video_watch_url.clone(),
        }
    }

    fn poster(&self, path: &str) -> String {
        let sep = if path.starts_with('/') { "" } else { "/" };
        format!(
            "{}/{}{}{}",
            self.image_base_url.trim_end_matches('/'),
            self.poster_size,
            sep,
            path
        )
    }

    fn video(&self, key: &str) -> String {
        format!("{}{}", self.video_watch_url, key)
    }
}

pub fn reduce(
    candidate: &SearchCandidate,
    lookup: &MovieLookup,
    links: &LinkTemplates,
) -> DisplayRecord {
    let poster = candidate
        .poster_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .map(|p| links.poster(p))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    // Not validated: a malformed date yields whatever its first four chars are.
    let year: String = candidate
        .release_date
        .as_deref()
        .unwrap_or_default()
        .chars()
        .take(4)
        .collect();

    let director = lookup
        .credits
        .crew
        .iter()
        .find(|member| member.job == DIRECTOR_JOB)
        .map(|member| member.name.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let main_actors = lookup
        .credits
        .cast
        .iter()
        .take(MAIN_ACTOR_COUNT)
        .map(|actor| actor.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let trailer = lookup
        .videos
        .results
        .iter()
        .find(|v| v.kind == TRAILER_TYPE && v.site == TRAILER_SITE)
        .map(|v| links.video(&v.key))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    DisplayRecord {
        title: candidate.title.clone(),
        year,
        id: candidate.id,
        poster,
        director,
        main_actors,
        trailer,
    }
}
