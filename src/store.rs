//! SQLite-backed catalog store.
//!
//! The store is a handle on a database path rather than a long-lived
//! connection: each operation opens its own connection and commits (or rolls
//! back) before returning, so no unit of work outlives a single command.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::movie::Movie;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT UNIQUE NOT NULL,
        year INTEGER NOT NULL,
        rating REAL NOT NULL,
        poster_image_url TEXT
    )
";

/// Owner of the `movies` table.
#[derive(Debug, Clone)]
pub struct MovieStore {
    path: PathBuf,
}

impl MovieStore {
    /// Open (or create) the database at `path` and make sure the table exists.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let store = Self { path: path.into() };
        store.ensure_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `movies` table if it is absent. Safe to call on every startup.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Every stored movie in insertion order.
    pub fn list(&self) -> Result<Vec<Movie>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT title, year, rating, poster_image_url FROM movies ORDER BY id")?;
        let movies = stmt
            .query_map([], movie_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = movies.len(), "listed movies");
        Ok(movies)
    }

    /// Look up a single movie by its exact title. No menu action needs a
    /// single-record read; this serves library callers and tests.
    pub fn get(&self, title: &str) -> Result<Option<Movie>> {
        let conn = self.connect()?;
        let movie = conn
            .query_row(
                "SELECT title, year, rating, poster_image_url FROM movies WHERE title = ?1",
                params![title],
                movie_from_row,
            )
            .optional()?;
        Ok(movie)
    }

    /// Insert a new movie. An existing title is never overwritten.
    pub fn add(&self, movie: &Movie) -> Result<()> {
        require_title(&movie.title)?;
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let inserted = tx.execute(
            "INSERT INTO movies (title, year, rating, poster_image_url) VALUES (?1, ?2, ?3, ?4)",
            params![
                movie.title,
                movie.year,
                movie.rating,
                movie.poster_image_url
            ],
        );
        match inserted {
            Ok(_) => {}
            // Dropping `tx` rolls the transaction back.
            Err(err) if is_unique_violation(&err) => {
                return Err(CatalogError::DuplicateTitle {
                    title: movie.title.clone(),
                });
            }
            Err(err) => return Err(err.into()),
        }
        tx.commit()?;
        debug!(title = %movie.title, "added movie");
        Ok(())
    }

    /// Remove the movie with `title`. Returns whether a row was removed.
    pub fn delete(&self, title: &str) -> Result<bool> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM movies WHERE title = ?1", params![title])?;
        debug!(title, removed, "delete movie");
        Ok(removed > 0)
    }

    /// Overwrite the rating of `title`. Returns whether the movie existed.
    pub fn update(&self, title: &str, rating: f64) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE movies SET rating = ?1 WHERE title = ?2",
            params![rating, title],
        )?;
        debug!(title, rating, changed, "update movie");
        Ok(changed > 0)
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }
}

fn movie_from_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
    let poster: Option<String> = row.get(3)?;
    Ok(Movie {
        title: row.get(0)?,
        year: row.get(1)?,
        rating: row.get(2)?,
        poster_image_url: poster.unwrap_or_default(),
    })
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::InvalidInput(
            "movie title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
