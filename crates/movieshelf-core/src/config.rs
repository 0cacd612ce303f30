use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api_key` from the config file.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Global configuration loaded from `~/.config/movieshelf/config.toml`.
///
/// Keys missing from the file take their default values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Catalog API key, sent as the `api_key` query parameter.
    pub api_key: Option<String>,
    /// Base URL of the catalog REST API.
    pub base_url: String,
    /// Image host prefix; the poster size and poster path are appended to it.
    pub image_base_url: String,
    /// Poster width bucket (e.g. "w200").
    pub poster_size: String,
    /// Prefix turned into a full trailer link by appending the video key.
    pub video_watch_url: String,
    /// Directory holding the saved library; None = `~/.local/share/movieshelf`.
    pub library_dir: Option<PathBuf>,
    /// Optional connect timeout for catalog requests (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-request timeout for catalog requests (None = wait forever).
    pub request_timeout_secs: Option<u64>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            poster_size: "w200".to_string(),
            video_watch_url: "https://www.youtube.com/watch?v=".to_string(),
            library_dir: None,
            connect_timeout_secs: None,
            request_timeout_secs: None,
        }
    }
}

impl ShelfConfig {
    /// Replace `api_key` when an override value is present and non-empty.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// The configured API key, or an error naming where to set one.
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => anyhow::bail!(
                "no catalog API key configured; set api_key in the config file or {}",
                API_KEY_ENV
            ),
        }
    }

    /// Directory for the saved library, falling back to the XDG data dir.
    pub fn library_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.library_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("movieshelf")?;
        Ok(xdg_dirs.get_data_home())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("movieshelf")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// The `TMDB_API_KEY` environment variable takes precedence over the file.
pub fn load_or_init() -> Result<ShelfConfig> {
    let path = config_path()?;
    let cfg = load_or_init_at(&path)?;
    Ok(cfg.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
}

/// Like [`load_or_init`] but for an explicit path and without the env override.
pub fn load_or_init_at(path: &Path) -> Result<ShelfConfig> {
    if !path.exists() {
        let default_cfg = ShelfConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ShelfConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
