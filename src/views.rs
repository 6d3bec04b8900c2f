//! Read-only views derived from a catalog snapshot.

use rand::Rng;
use rand::seq::SliceRandom;
use regex::{Regex, RegexBuilder};

use crate::movie::Movie;

/// Summary of the ratings in a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub mean: f64,
    pub median: f64,
    /// Every movie tied at the highest rating, in catalog order.
    pub best: Vec<Movie>,
    /// Every movie tied at the lowest rating, in catalog order.
    pub worst: Vec<Movie>,
}

/// Mean, median, best and worst of the catalog; `None` when it is empty.
pub fn rating_stats(movies: &[Movie]) -> Option<RatingStats> {
    if movies.is_empty() {
        return None;
    }
    let mut ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
    let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;

    ratings.sort_by(f64::total_cmp);
    let mid = ratings.len() / 2;
    let median = if ratings.len() % 2 == 0 {
        (ratings[mid - 1] + ratings[mid]) / 2.0
    } else {
        ratings[mid]
    };

    let lowest = ratings[0];
    let highest = ratings[ratings.len() - 1];
    let tied_at = |value: f64| -> Vec<Movie> {
        movies
            .iter()
            .filter(|m| m.rating == value)
            .cloned()
            .collect()
    };

    Some(RatingStats {
        mean,
        median,
        best: tied_at(highest),
        worst: tied_at(lowest),
    })
}

/// Uniform pick over the catalog.
pub fn random_movie<'a, R: Rng + ?Sized>(movies: &'a [Movie], rng: &mut R) -> Option<&'a Movie> {
    movies.choose(rng)
}

/// Case-insensitive title search. `term` is treated as a regular expression
/// when it is one, otherwise as a literal substring.
pub fn search(movies: &[Movie], term: &str) -> Vec<Movie> {
    match build_pattern(term) {
        Some(pattern) => movies
            .iter()
            .filter(|m| pattern.is_match(&m.title))
            .cloned()
            .collect(),
        None => {
            let needle = term.to_lowercase();
            movies
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
    }
}

fn build_pattern(term: &str) -> Option<Regex> {
    RegexBuilder::new(term)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(term))
                .case_insensitive(true)
                .build()
        })
        .ok()
}

/// The catalog ordered by rating, highest first. Ties keep catalog order.
pub fn sorted_by_rating(movies: &[Movie]) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted
}
