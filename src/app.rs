//! Explicit application context shared by the menu and the web service.

use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::movie::Movie;
use crate::omdb::OmdbClient;
use crate::page::{PageTemplate, StaticSite, write_static_site};
use crate::store::MovieStore;

/// Configuration, store handle and HTTP client for one running program.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub store: MovieStore,
    http: Client,
}

impl AppContext {
    /// Open the configured database (creating the table if needed) and build
    /// the outbound HTTP client.
    pub fn new(config: Config) -> Result<Self> {
        let store = MovieStore::open(&config.db_path)?;
        let http = Client::builder()
            .build()
            .map_err(|err| CatalogError::Configuration(format!("failed to create HTTP client: {err}")))?;
        Ok(Self {
            config,
            store,
            http,
        })
    }

    pub fn metadata_client(&self) -> Result<OmdbClient> {
        OmdbClient::from_config(&self.config, self.http.clone())
    }

    /// Look `title` up on OMDb and store the result. Nothing is stored when
    /// the lookup fails.
    pub async fn add_by_title(&self, title: &str) -> Result<Movie> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CatalogError::InvalidInput(
                "movie title cannot be empty".to_string(),
            ));
        }
        let client = self.metadata_client()?;
        let movie = client.fetch(title).await.inspect_err(|err| {
            warn!(title, error = %err, "metadata lookup failed");
        })?;
        self.store.add(&movie)?;
        info!(title = %movie.title, year = movie.year, "movie added");
        Ok(movie)
    }

    /// Render the catalog page from the current store contents.
    pub fn render_page(&self) -> Result<String> {
        let template = PageTemplate::load(&self.config.site_layout().template)?;
        let movies = self.store.list()?;
        Ok(template.render(&movies, &self.config.page_title))
    }

    /// Write the static snapshot of the catalog.
    pub fn generate_site(&self) -> Result<StaticSite> {
        let movies = self.store.list()?;
        write_static_site(&movies, &self.config.site_layout(), &self.config.page_title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{scratch_context, spawn_fake_omdb};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn add_by_title_stores_the_fetched_movie() {
        let url = spawn_fake_omdb().await;
        let (_dir, ctx) = scratch_context(Some(url));

        let movie = ctx.add_by_title("  inception ").await.unwrap();
        assert_eq!(movie.title, "Inception");
        assert_eq!(ctx.store.list().unwrap(), vec![movie]);
    }

    #[tokio::test]
    async fn unknown_title_leaves_store_unchanged() {
        let url = spawn_fake_omdb().await;
        let (_dir, ctx) = scratch_context(Some(url));
        ctx.add_by_title("Heat").await.unwrap();
        let before = ctx.store.list().unwrap();

        let err = ctx.add_by_title("No Such Film").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
        assert_eq!(ctx.store.list().unwrap(), before);
    }

    #[tokio::test]
    async fn second_add_of_same_title_is_a_duplicate() {
        let url = spawn_fake_omdb().await;
        let (_dir, ctx) = scratch_context(Some(url));
        ctx.add_by_title("Heat").await.unwrap();
        let err = ctx.add_by_title("heat").await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTitle { .. }));
        assert_eq!(ctx.store.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_api_key_is_reported() {
        let (_dir, ctx) = scratch_context(None);
        let err = ctx.add_by_title("Heat").await.unwrap_err();
        assert!(matches!(err, CatalogError::Configuration(_)));
        assert!(ctx.store.list().unwrap().is_empty());
    }

    #[test]
    fn render_page_reflects_current_store() {
        let (_dir, ctx) = scratch_context(None);
        let empty = ctx.render_page().unwrap();
        assert!(empty.contains("<title>My Movie App</title>"));
        assert!(!empty.contains("<li>"));

        ctx.store.add(&Movie::new("Heat", 1995, 8.3, "")).unwrap();
        assert!(ctx.render_page().unwrap().contains("Heat"));
    }
}
