/// Movie metadata provider abstraction
///
/// Keeps the recommendation flow independent of the concrete metadata API so
/// tests can swap in mocks and another catalogue can be plugged in later.
use crate::{
    error::AppResult,
    models::{Genre, Movie},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for movies by free text, in the provider's relevance order
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>>;

    /// List the genres the provider knows about
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    /// Popular movies matching any of the given genre IDs
    async fn discover_by_genres(&self, genre_ids: &[u64]) -> AppResult<Vec<Movie>>;

    /// Fetch full details for a single movie, `None` if the ID is unknown
    async fn movie_details(&self, movie_id: u64) -> AppResult<Option<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
