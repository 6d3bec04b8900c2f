//! Core library for a personal movie catalog: SQLite storage, OMDb
//! enrichment and HTML page generation.

mod app;
mod config;
mod error;
mod movie;
mod omdb;
mod page;
mod server;
mod store;
mod views;

#[cfg(test)]
mod testing;

pub use app::AppContext;
pub use config::{
    Config, DEFAULT_OMDB_URL, DEFAULT_PAGE_TITLE, ENV_API_KEY, ENV_API_URL, ENV_DB_PATH,
    ENV_SITE_DIR, ENV_STATIC_DIR,
};
pub use error::{CatalogError, Result};
pub use movie::Movie;
pub use omdb::{OmdbClient, parse_response, parse_year};
pub use page::{
    GRID_PLACEHOLDER, PageTemplate, SiteLayout, StaticSite, TITLE_PLACEHOLDER, movie_grid,
    write_static_site,
};
pub use server::{ServerError, router, serve};
pub use store::MovieStore;
pub use views::{RatingStats, random_movie, rating_stats, search, sorted_by_rating};
