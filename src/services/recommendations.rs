use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Genre, Movie, Recommendations, SearchCriteria, VibeQuery},
    services::{
        llm::{LanguageModel, OpenAiCompatibleModel},
        providers::{MovieProvider, TmdbProvider},
    },
};

/// Common spellings the model uses that TMDb names differently
const GENRE_ALIASES: &[(&str, &str)] = &[
    ("sci-fi", "science fiction"),
    ("scifi", "science fiction"),
    ("romcom", "romance"),
    ("rom-com", "romance"),
    ("animated", "animation"),
    ("documentaries", "documentary"),
    ("musical", "music"),
];

/// Largest list a single request may ask for
pub const MAX_RESULT_LIMIT: usize = 20;

/// Turns a vibe into a short movie list
///
/// One best-effort cycle: ask the language model for criteria, then query the
/// metadata provider sequentially, most specific criteria first, until the
/// limit is reached.
pub struct Recommender {
    language_model: Arc<dyn LanguageModel>,
    movie_provider: Arc<dyn MovieProvider>,
    limit: usize,
}

impl Recommender {
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        movie_provider: Arc<dyn MovieProvider>,
        limit: usize,
    ) -> Self {
        Self {
            language_model,
            movie_provider,
            limit: limit.clamp(1, MAX_RESULT_LIMIT),
        }
    }

    /// Builds the OpenAI-compatible model and TMDb provider from config
    ///
    /// Fails with a config error before any client exists when a key is missing.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let keys = config.require_api_keys()?;

        let language_model = OpenAiCompatibleModel::new(
            keys.llm,
            config.llm_api_url.clone(),
            config.llm_model.clone(),
        );
        let movie_provider = TmdbProvider::new(
            keys.tmdb,
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
        );

        Ok(Self::new(
            Arc::new(language_model),
            Arc::new(movie_provider),
            config.result_limit,
        ))
    }

    /// Recommend movies for a vibe
    ///
    /// `limit` overrides the configured limit when it is non-zero and must not
    /// exceed [`MAX_RESULT_LIMIT`].
    pub async fn recommend(&self, vibe: &str, limit: Option<usize>) -> AppResult<Recommendations> {
        let vibe = VibeQuery::new(vibe)?;
        let limit = match limit {
            Some(l) if l > MAX_RESULT_LIMIT => {
                return Err(AppError::InvalidInput(format!(
                    "Limit must be at most {}",
                    MAX_RESULT_LIMIT
                )));
            }
            Some(l) if l > 0 => l,
            _ => self.limit,
        };

        let criteria = self.language_model.derive_criteria(&vibe).await?;

        let movies = if criteria.is_empty() {
            tracing::warn!(
                vibe = %vibe.as_str(),
                provider = self.language_model.name(),
                "No search criteria derived"
            );
            Vec::new()
        } else {
            self.collect_movies(&criteria, limit).await?
        };

        tracing::info!(
            vibe = %vibe.as_str(),
            movies = movies.len(),
            limit = limit,
            "Recommendations ready"
        );

        Ok(Recommendations {
            vibe: vibe.as_str().to_string(),
            criteria,
            movies,
        })
    }

    async fn collect_movies(
        &self,
        criteria: &SearchCriteria,
        limit: usize,
    ) -> AppResult<Vec<Movie>> {
        let mut picks = Picks::new(limit);

        // Suggested titles: only the best match per title
        for title in &criteria.titles {
            if picks.is_full() {
                break;
            }
            let results = self.movie_provider.search_movies(title).await?;
            if let Some(first) = results.into_iter().next() {
                picks.extend([first]);
            }
        }

        for keyword in &criteria.keywords {
            if picks.is_full() {
                break;
            }
            let results = self.movie_provider.search_movies(keyword).await?;
            picks.extend(results);
        }

        if !picks.is_full() && !criteria.genres.is_empty() {
            let known = self.movie_provider.genres().await?;
            let genre_ids = match_genres(&criteria.genres, &known);
            if genre_ids.is_empty() {
                tracing::debug!(genres = ?criteria.genres, "No genre names matched");
            } else {
                let results = self.movie_provider.discover_by_genres(&genre_ids).await?;
                picks.extend(results);
            }
        }

        let mut movies = picks.into_movies();
        self.fill_missing_overviews(&mut movies).await;
        Ok(movies)
    }

    /// Search results sometimes lack an overview; details may carry one
    async fn fill_missing_overviews(&self, movies: &mut [Movie]) {
        for movie in movies.iter_mut().filter(|m| m.overview.is_none()) {
            match self.movie_provider.movie_details(movie.id).await {
                Ok(Some(details)) => {
                    movie.overview = details.overview;
                    movie.release_date = movie.release_date.or(details.release_date);
                    movie.vote_average = movie.vote_average.or(details.vote_average);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, movie_id = movie.id, "Details lookup failed");
                }
            }
        }
    }
}

/// Map genre names to provider genre IDs, case-insensitively
fn match_genres(names: &[String], known: &[Genre]) -> Vec<u64> {
    let mut ids = Vec::new();

    for name in names {
        let wanted = name.trim().to_lowercase();
        let wanted = GENRE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == wanted)
            .map(|(_, canonical)| canonical.to_string())
            .unwrap_or(wanted);

        if let Some(genre) = known.iter().find(|g| g.name.to_lowercase() == wanted) {
            if !ids.contains(&genre.id) {
                ids.push(genre.id);
            }
        }
    }

    ids
}

/// Deduplicating, size-capped movie list in first-seen order
struct Picks {
    movies: Vec<Movie>,
    seen: HashSet<u64>,
    limit: usize,
}

impl Picks {
    fn new(limit: usize) -> Self {
        Self {
            movies: Vec::new(),
            seen: HashSet::new(),
            limit,
        }
    }

    fn is_full(&self) -> bool {
        self.movies.len() >= self.limit
    }

    fn extend(&mut self, movies: impl IntoIterator<Item = Movie>) {
        for movie in movies {
            if self.is_full() {
                return;
            }
            if self.seen.insert(movie.id) {
                self.movies.push(movie);
            }
        }
    }

    fn into_movies(self) -> Vec<Movie> {
        self.movies
    }
}
