//! Runtime configuration sourced from the environment (and `.env`).

use std::env;
use std::path::PathBuf;

use crate::error::{CatalogError, Result};
use crate::page::SiteLayout;

pub const DEFAULT_DB_PATH: &str = "movies.db";
pub const DEFAULT_STATIC_DIR: &str = "_static";
pub const DEFAULT_SITE_DIR: &str = "site";
pub const DEFAULT_PAGE_TITLE: &str = "My Movie App";
pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";

pub const ENV_API_KEY: &str = "OMDB_API_KEY";
pub const ENV_API_URL: &str = "OMDB_API_URL";
pub const ENV_DB_PATH: &str = "MOVIES_DB";
pub const ENV_STATIC_DIR: &str = "MOVIES_STATIC_DIR";
pub const ENV_SITE_DIR: &str = "MOVIES_SITE_DIR";
pub const ENV_PAGE_TITLE: &str = "MOVIES_PAGE_TITLE";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Directory holding `index_template.html` and `style.css`.
    pub static_dir: PathBuf,
    /// Destination of the static snapshot.
    pub site_dir: PathBuf,
    pub page_title: String,
    pub omdb_api_key: Option<String>,
    pub omdb_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            site_dir: PathBuf::from(DEFAULT_SITE_DIR),
            page_title: DEFAULT_PAGE_TITLE.to_string(),
            omdb_api_key: None,
            omdb_base_url: DEFAULT_OMDB_URL.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from process environment variables.
    ///
    /// Callers that want `.env` support should run `dotenvy::dotenv()` first.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup, falling back to
    /// defaults for anything unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            db_path: get(ENV_DB_PATH).map(PathBuf::from).unwrap_or(defaults.db_path),
            static_dir: get(ENV_STATIC_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            site_dir: get(ENV_SITE_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.site_dir),
            page_title: get(ENV_PAGE_TITLE).unwrap_or(defaults.page_title),
            omdb_api_key: get(ENV_API_KEY),
            omdb_base_url: get(ENV_API_URL).unwrap_or(defaults.omdb_base_url),
        }
    }

    /// The OMDb API key, or a configuration error naming the missing variable.
    pub fn api_key(&self) -> Result<&str> {
        match self.omdb_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(CatalogError::Configuration(format!(
                "{ENV_API_KEY} not found. Please set it in your .env file."
            ))),
        }
    }

    pub fn site_layout(&self) -> SiteLayout {
        SiteLayout::new(&self.static_dir, &self.site_dir)
    }
}
