//! Shared fixtures for unit tests: a scratch catalog and a local stand-in
//! for the OMDb API.

use std::collections::HashMap;
use std::fs;

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::json;
use tempfile::TempDir;

use crate::app::AppContext;
use crate::config::Config;
use crate::page::{STYLESHEET_FILE, TEMPLATE_FILE};

pub const TEST_TEMPLATE: &str = "<html><head><title>__TEMPLATE_TITLE__</title><link rel=\"stylesheet\" href=\"style.css\"></head><body><ol class=\"movie-grid\">__TEMPLATE_MOVIE_GRID__</ol></body></html>";
pub const TEST_STYLESHEET: &str = ".movie { display: inline-block; }";
pub const TEST_API_KEY: &str = "test-key";

/// Serve a fake OMDb that knows "Inception" and "Heat", answers
/// "Server Error" with a 500, "Lost Reel" with an unusable year and
/// everything else with `Response: False`.
pub async fn spawn_fake_omdb() -> String {
    let router = Router::new().route("/", get(fake_omdb));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake omdb");
    let addr = listener.local_addr().expect("fake omdb addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake omdb");
    });
    format!("http://{addr}/")
}

async fn fake_omdb(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("apikey").map(String::as_str) != Some(TEST_API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"Response": "False", "Error": "Invalid API key!"})),
        )
            .into_response();
    }
    let title = params.get("t").map(String::as_str).unwrap_or_default();
    let body = match title.to_lowercase().as_str() {
        "inception" => json!({
            "Title": "Inception",
            "Year": "2010",
            "imdbRating": "8.8",
            "Poster": "https://img.example/inception.jpg",
            "Response": "True"
        }),
        "heat" => json!({
            "Title": "Heat",
            "Year": "1995",
            "imdbRating": "8.3",
            "Poster": "N/A",
            "Response": "True"
        }),
        "lost reel" => json!({
            "Title": "Lost Reel",
            "Year": "N/A",
            "imdbRating": "6.1",
            "Poster": "N/A",
            "Response": "True"
        }),
        "server error" => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => json!({"Response": "False", "Error": "Movie not found!"}),
    };
    Json(body).into_response()
}

/// A context rooted in a temporary directory with template and stylesheet in
/// place. Keep the returned [`TempDir`] alive for the duration of the test.
pub fn scratch_context(omdb_url: Option<String>) -> (TempDir, AppContext) {
    let dir = tempfile::tempdir().expect("tempdir");
    let static_dir = dir.path().join("_static");
    fs::create_dir_all(&static_dir).expect("static dir");
    fs::write(static_dir.join(TEMPLATE_FILE), TEST_TEMPLATE).expect("template");
    fs::write(static_dir.join(STYLESHEET_FILE), TEST_STYLESHEET).expect("stylesheet");

    let mut config = Config {
        db_path: dir.path().join("movies.db"),
        static_dir,
        site_dir: dir.path().join("site"),
        ..Config::default()
    };
    if let Some(url) = omdb_url {
        config.omdb_api_key = Some(TEST_API_KEY.to_string());
        config.omdb_base_url = url;
    }
    let ctx = AppContext::new(config).expect("context");
    (dir, ctx)
}
