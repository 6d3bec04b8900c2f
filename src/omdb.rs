//! OMDb metadata lookups.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::movie::Movie;

/// Client for the OMDb title lookup endpoint.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    http: Client,
    base_url: String,
    api_key: String,
}

/// Raw OMDb payload. Every field is optional so that a missing one can be
/// reported as a parse error naming the field.
#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl OmdbClient {
    pub fn new<U: Into<String>, K: Into<String>>(http: Client, base_url: U, api_key: K) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from configuration. Fails before any request is made
    /// when the API key is not configured.
    pub fn from_config(config: &Config, http: Client) -> Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::new(http, config.omdb_base_url.clone(), api_key))
    }

    /// Look up `title` and normalize the answer into a [`Movie`].
    pub async fn fetch(&self, title: &str) -> Result<Movie> {
        debug!(title, "querying OMDb");
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|err| CatalogError::Network(err.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(title, %status, "OMDb returned an error status");
            return Err(CatalogError::Network(format!("OMDb returned HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|err| CatalogError::Network(err.without_url().to_string()))?;
        parse_response(title, &body)
    }
}

/// Interpret an OMDb response body for the requested `title`.
pub fn parse_response(requested: &str, body: &str) -> Result<Movie> {
    let payload: OmdbPayload = serde_json::from_str(body)
        .map_err(|err| CatalogError::Parse(format!("invalid JSON: {err}")))?;

    match payload.response.as_deref() {
        Some("True") => {}
        Some("False") => {
            debug!(
                title = requested,
                reason = payload.error.as_deref().unwrap_or("unknown"),
                "OMDb has no match"
            );
            return Err(CatalogError::NotFound {
                title: requested.to_string(),
            });
        }
        other => {
            return Err(CatalogError::Parse(format!(
                "unexpected Response field: {other:?}"
            )));
        }
    }

    let title = required(payload.title, "Title")?;
    let year = parse_year(&required(payload.year, "Year")?)?;
    let rating = parse_rating(&required(payload.imdb_rating, "imdbRating")?)?;
    let poster = required(payload.poster, "Poster")?;
    Ok(Movie::new(title, year, rating, poster))
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| CatalogError::Parse(format!("missing field '{field}'")))
}

/// First four digits of a possibly decorated year such as `2010–2013`.
pub fn parse_year(raw: &str) -> Result<i32> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() < 4 {
        return Err(CatalogError::Parse(format!("invalid year '{raw}'")));
    }
    digits
        .parse()
        .map_err(|_| CatalogError::Parse(format!("invalid year '{raw}'")))
}

fn parse_rating(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(rating) if rating.is_finite() => Ok(rating),
        _ => Err(CatalogError::Parse(format!("invalid rating '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{TEST_API_KEY, spawn_fake_omdb};
    use pretty_assertions::assert_eq;

    #[test]
    fn years_are_reduced_to_four_digits() {
        assert_eq!(parse_year("1999").unwrap(), 1999);
        assert_eq!(parse_year("2010–2013").unwrap(), 2010);
        assert_eq!(parse_year("2019–").unwrap(), 2019);
        assert!(matches!(parse_year("N/A"), Err(CatalogError::Parse(_))));
        assert!(matches!(parse_year("99"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn successful_payload_becomes_a_movie() {
        let body = r#"{"Title":"Alien","Year":"1979","imdbRating":"8.5","Poster":"https://img/alien.jpg","Response":"True"}"#;
        assert_eq!(
            parse_response("alien", body).unwrap(),
            Movie::new("Alien", 1979, 8.5, "https://img/alien.jpg")
        );
    }

    #[test]
    fn false_response_is_not_found() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = parse_response("Nope", body).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { ref title } if title == "Nope"));
    }

    #[test]
    fn malformed_payloads_are_parse_errors() {
        let cases = [
            "not json",
            r#"{"Title":"Alien","Year":"1979","Poster":"x","Response":"True"}"#,
            r#"{"Title":"Alien","Year":"1979","imdbRating":"N/A","Poster":"x","Response":"True"}"#,
            r#"{"Title":"Alien","Year":"N/A","imdbRating":"8.5","Poster":"x","Response":"True"}"#,
            r#"{"Title":"Alien"}"#,
        ];
        for body in cases {
            let err = parse_response("Alien", body).unwrap_err();
            assert!(matches!(err, CatalogError::Parse(_)), "{body}: {err}");
        }
    }

    #[test]
    fn missing_api_key_fails_before_any_request() {
        let config = Config::default();
        let err = OmdbClient::from_config(&config, Client::new()).unwrap_err();
        assert!(matches!(err, CatalogError::Configuration(_)));
    }

    #[tokio::test]
    async fn fetch_against_fake_service() {
        let url = spawn_fake_omdb().await;
        let client = OmdbClient::new(Client::new(), url, TEST_API_KEY);

        let movie = client.fetch("Inception").await.unwrap();
        assert_eq!(
            movie,
            Movie::new("Inception", 2010, 8.8, "https://img.example/inception.jpg")
        );

        let err = client.fetch("Unheard Of").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));

        let err = client.fetch("Server Error").await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = OmdbClient::new(Client::new(), format!("http://{addr}/"), TEST_API_KEY);
        let err = client.fetch("Inception").await.unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
        assert!(!err.to_string().contains(TEST_API_KEY));
    }
}
