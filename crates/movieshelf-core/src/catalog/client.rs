//! Blocking catalog client built on the curl crate (libcurl).

use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use super::{
    Catalog, CatalogEndpoints, CatalogError, CreditsRecord, DetailsRecord, SearchResultSet,
    VideosRecord,
};
use crate::config::ShelfConfig;

const SEARCH_ENDPOINT: &str = "/search/movie";

/// Performs catalog GETs and decodes their JSON bodies.
///
/// No retries and no caching. Timeouts apply only when configured.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    endpoints: CatalogEndpoints,
    connect_timeout: Option<Duration>,
    timeout: Option<Duration>,
}

impl CatalogClient {
    pub fn new(endpoints: CatalogEndpoints) -> Self {
        Self {
            endpoints,
            connect_timeout: None,
            timeout: None,
        }
    }

    /// Build a client from config; fails when no API key is configured.
    pub fn from_config(cfg: &ShelfConfig) -> anyhow::Result<Self> {
        let endpoints = CatalogEndpoints::new(&cfg.base_url, cfg.require_api_key()?)?;
        Ok(Self {
            endpoints,
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.request_timeout_secs.map(Duration::from_secs),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: &Url) -> Result<T, CatalogError> {
        tracing::debug!(endpoint, "catalog request");
        let (status, body) = self.fetch(url).map_err(|source| CatalogError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        tracing::debug!(endpoint, status, bytes = body.len(), "catalog response");
        decode_response(endpoint, status, &body)
    }

    fn fetch(&self, url: &Url) -> Result<(u32, Vec<u8>), curl::Error> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.useragent(concat!("movieshelf/", env!("CARGO_PKG_VERSION")))?;
        if let Some(t) = self.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.timeout {
            easy.timeout(t)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        Ok((code, body))
    }
}

/// Only a 200 body is decoded; every other status is reported without parsing.
pub(crate) fn decode_response<T: DeserializeOwned>(
    endpoint: &str,
    status: u32,
    body: &[u8],
) -> Result<T, CatalogError> {
    if status != 200 {
        return Err(CatalogError::Status {
            status,
            endpoint: endpoint.to_string(),
        });
    }
    serde_json::from_slice(body).map_err(|source| CatalogError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

impl Catalog for CatalogClient {
    fn search(&self, query: &str) -> Result<SearchResultSet, CatalogError> {
        let url = self.endpoints.search(query)?;
        self.get_json(SEARCH_ENDPOINT, &url)
    }

    fn movie_details(&self, id: u64) -> Result<DetailsRecord, CatalogError> {
        let url = self.endpoints.details(id)?;
        self.get_json(&CatalogEndpoints::details_path(id), &url)
    }

    fn movie_credits(&self, id: u64) -> Result<CreditsRecord, CatalogError> {
        let url = self.endpoints.credits(id)?;
        self.get_json(&CatalogEndpoints::credits_path(id), &url)
    }

    fn movie_videos(&self, id: u64) -> Result<VideosRecord, CatalogError> {
        let url = self.endpoints.videos(id)?;
        self.get_json(&CatalogEndpoints::videos_path(id), &url)
    }
}
