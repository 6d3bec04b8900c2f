use serde::{Deserialize, Serialize};

/// Single catalog entry. The title is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[serde(default)]
    pub poster_image_url: String,
}

impl Movie {
    pub fn new<S: Into<String>, P: Into<String>>(
        title: S,
        year: i32,
        rating: f64,
        poster_image_url: P,
    ) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            poster_image_url: poster_image_url.into(),
        }
    }
}
