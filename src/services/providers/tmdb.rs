/// TMDb (The Movie Database) provider
///
/// API Flow:
/// 1. Title / keyword search: /search/movie → ranked movie list
/// 2. Genre lookup: /genre/movie/list → id/name pairs
/// 3. Genre browsing: /discover/movie?with_genres=… → popular movies
/// 4. Details: /movie/{id}
///
/// Authenticates with the v3 `api_key` query parameter.
use crate::{
    error::{AppError, AppResult},
    models::{Genre, Movie, TmdbGenreList, TmdbMovie, TmdbPage},
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, Response, StatusCode};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Issue a GET against `path` with auth and language attached
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Response> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        Ok(response)
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "TMDb API returned status {}: {}",
            status, body
        )))
    }

    /// Parse a paged movie list, skipping entries that do not look like movies
    fn parse_movie_list(body: &str) -> Vec<Movie> {
        let page: TmdbPage = match serde_json::from_str(body) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, response = %body, "Invalid TMDb list response");
                return Vec::new();
            }
        };

        page.results
            .into_iter()
            .filter_map(|result| {
                serde_json::from_value::<TmdbMovie>(result)
                    .map(Movie::from)
                    .map_err(|e| tracing::debug!(error = %e, "Skipping malformed TMDb entry"))
                    .ok()
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let response = self
            .get(
                "/search/movie",
                &[("query", query.trim()), ("include_adult", "false")],
            )
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        let movies = Self::parse_movie_list(&body);

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let response = self.get("/genre/movie/list", &[]).await?;
        let body = Self::ensure_success(response).await?.text().await?;

        let genres = match serde_json::from_str::<TmdbGenreList>(&body) {
            Ok(list) => list.genres,
            Err(e) => {
                tracing::warn!(error = %e, response = %body, "Invalid TMDb genre response");
                Vec::new()
            }
        };

        tracing::debug!(genres = genres.len(), provider = self.name(), "Genres loaded");
        Ok(genres)
    }

    async fn discover_by_genres(&self, genre_ids: &[u64]) -> AppResult<Vec<Movie>> {
        if genre_ids.is_empty() {
            return Ok(Vec::new());
        }

        // A pipe separator means "any of these genres"
        let with_genres = genre_ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("|");

        let response = self
            .get(
                "/discover/movie",
                &[
                    ("with_genres", with_genres.as_str()),
                    ("sort_by", "popularity.desc"),
                    ("include_adult", "false"),
                ],
            )
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        let movies = Self::parse_movie_list(&body);

        tracing::info!(
            genres = %with_genres,
            results = movies.len(),
            provider = self.name(),
            "Genre discovery completed"
        );

        Ok(movies)
    }

    async fn movie_details(&self, movie_id: u64) -> AppResult<Option<Movie>> {
        let response = self.get(&format!("/movie/{}", movie_id), &[]).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = Self::ensure_success(response).await?.text().await?;

        match serde_json::from_str::<TmdbMovie>(&body) {
            Ok(movie) => Ok(Some(Movie::from(movie))),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    movie_id = movie_id,
                    "Failed to parse TMDb movie details"
                );
                Ok(None)
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
