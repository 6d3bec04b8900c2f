//! Live catalog page served over HTTP.

use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;

use axum::extract::{Form, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::error::CatalogError;

/// Routes: `GET /`, `GET /style.css`, `POST /add`.
pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/style.css", get(stylesheet))
        .route("/add", post(add_movie))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(ctx: AppContext, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "serving movie catalog");
    axum::serve(listener, router(ctx)).await
}

/// Catalog failures as plain-text HTTP responses.
#[derive(Debug)]
pub struct ServerError(CatalogError);

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::DuplicateTitle { .. } => StatusCode::CONFLICT,
            CatalogError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CatalogError::Network(_) | CatalogError::Parse(_) => StatusCode::BAD_GATEWAY,
            CatalogError::Configuration(_)
            | CatalogError::Storage(_)
            | CatalogError::TemplateMissing { .. }
            | CatalogError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &self.0 {
            CatalogError::TemplateMissing { .. } => "Error: Template file not found.".to_string(),
            other => format!("Error: {other}"),
        };
        if self.0.is_expected() {
            info!(%status, error = %self.0, "request rejected");
        } else {
            warn!(%status, error = %self.0, "request failed");
        }
        (status, message).into_response()
    }
}

async fn index(State(ctx): State<AppContext>) -> Result<Html<String>, ServerError> {
    Ok(Html(ctx.render_page()?))
}

async fn stylesheet(State(ctx): State<AppContext>) -> Response {
    let path = ctx.config.site_layout().stylesheet;
    match fs::read(&path) {
        Ok(bytes) => ([(header::CONTENT_TYPE, "text/css")], bytes).into_response(),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "Error: stylesheet not found.").into_response()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read stylesheet");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddMovieForm {
    movie_title: Option<String>,
}

/// Fetch and store the submitted title, then redirect to `/`. A failed add is
/// answered in place with its status instead of redirecting.
async fn add_movie(
    State(ctx): State<AppContext>,
    Form(form): Form<AddMovieForm>,
) -> Result<Redirect, ServerError> {
    let title = form.movie_title.unwrap_or_default();
    if !title.trim().is_empty() {
        ctx.add_by_title(&title).await?;
    }
    Ok(Redirect::to("/"))
}
