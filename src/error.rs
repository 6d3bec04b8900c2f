use std::path::PathBuf;
use thiserror::Error;

/// Every failure the catalog can report to a menu action or HTTP handler.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("error connecting to OMDb API: {0}")]
    Network(String),

    #[error("movie '{title}' not found on OMDb")]
    NotFound { title: String },

    #[error("error parsing movie data: {0}")]
    Parse(String),

    #[error("movie '{title}' already exists in the database")]
    DuplicateTitle { title: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("template file '{}' not found", path.display())]
    TemplateMissing { path: PathBuf },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Duplicate titles and unknown upstream titles are ordinary outcomes of
    /// user input, not faults of the system.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            CatalogError::DuplicateTitle { .. } | CatalogError::NotFound { .. }
        )
    }
}

pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
