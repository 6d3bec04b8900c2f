//! HTML page generation by literal placeholder substitution.
//!
//! The template is an ordinary HTML document carrying two markers: one for
//! the page title and one for the movie grid. Values are inserted verbatim;
//! nothing is escaped.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::movie::Movie;

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";

pub const TEMPLATE_FILE: &str = "index_template.html";
pub const STYLESHEET_FILE: &str = "style.css";
pub const INDEX_FILE: &str = "index.html";

/// Where the template and stylesheet are read from and the snapshot goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    pub template: PathBuf,
    pub stylesheet: PathBuf,
    pub output_dir: PathBuf,
}

impl SiteLayout {
    pub fn new(static_dir: &Path, output_dir: &Path) -> Self {
        Self {
            template: static_dir.join(TEMPLATE_FILE),
            stylesheet: static_dir.join(STYLESHEET_FILE),
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn index_output(&self) -> PathBuf {
        self.output_dir.join(INDEX_FILE)
    }

    pub fn stylesheet_output(&self) -> PathBuf {
        self.output_dir.join(STYLESHEET_FILE)
    }
}

/// A loaded page template.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    source: String,
}

impl PageTemplate {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read the template at `path`. A file that does not exist is reported as
    /// [`CatalogError::TemplateMissing`].
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(source) => Ok(Self::new(source)),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(CatalogError::TemplateMissing {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(CatalogError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Substitute `title` and the movie grid into the template.
    pub fn render(&self, movies: &[Movie], title: &str) -> String {
        // Title first, so a movie title containing a marker is left alone.
        self.source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(GRID_PLACEHOLDER, &movie_grid(movies))
    }
}

/// Concatenated grid markup, one `<li>` per movie.
pub fn movie_grid(movies: &[Movie]) -> String {
    movies.iter().map(movie_fragment).collect()
}

fn movie_fragment(movie: &Movie) -> String {
    format!(
        r#"
        <li>
            <div class="movie">
                <img class="movie-poster" src="{poster}"
                     title="{title}">
                <div class="movie-title">{title}</div>
                <div class="movie-year">{year}</div>
            </div>
        </li>
        "#,
        poster = movie.poster_image_url,
        title = movie.title,
        year = movie.year,
    )
}

/// Files produced by [`write_static_site`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSite {
    pub index: PathBuf,
    /// `None` when the source stylesheet was missing and nothing was copied.
    pub stylesheet: Option<PathBuf>,
}

/// Render the catalog and write it, with a copy of the stylesheet, into the
/// layout's output directory.
pub fn write_static_site(
    movies: &[Movie],
    layout: &SiteLayout,
    title: &str,
) -> Result<StaticSite> {
    let template = PageTemplate::load(&layout.template)?;
    let html = template.render(movies, title);

    fs::create_dir_all(&layout.output_dir).map_err(|source| CatalogError::Io {
        path: layout.output_dir.clone(),
        source,
    })?;
    let index = layout.index_output();
    fs::write(&index, html).map_err(|source| CatalogError::Io {
        path: index.clone(),
        source,
    })?;
    debug!(path = %index.display(), movies = movies.len(), "wrote index page");

    let target = layout.stylesheet_output();
    let stylesheet = match fs::copy(&layout.stylesheet, &target) {
        Ok(_) => Some(target),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(path = %layout.stylesheet.display(), "stylesheet not found; site left unstyled");
            None
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: target,
                source,
            });
        }
    };

    Ok(StaticSite { index, stylesheet })
}
