use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub mod vibe;

pub use vibe::{SearchCriteria, VibeQuery};

/// A movie presented to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDb identifier
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub vote_average: Option<f64>,
}

impl Movie {
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.map(|date| date.year())
    }
}

/// A TMDb movie genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Result of one recommendation cycle
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendations {
    pub vibe: String,
    pub criteria: SearchCriteria,
    pub movies: Vec<Movie>,
}

// ============================================================================
// TMDb API Types
// ============================================================================

/// Paged list response shared by /search/movie and /discover/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// Movie entry as returned by TMDb list and detail endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    /// "YYYY-MM-DD", sometimes an empty string for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl From<TmdbMovie> for Movie {
    fn from(movie: TmdbMovie) -> Self {
        let release_date = movie
            .release_date
            .as_deref()
            .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok());

        let overview = movie.overview.filter(|text| !text.trim().is_empty());

        Movie {
            id: movie.id,
            title: movie.title,
            overview,
            release_date,
            vote_average: movie.vote_average,
        }
    }
}

/// Response from GET /genre/movie/list
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}
