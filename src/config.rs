use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDb API key (v3 auth)
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDb API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language tag sent with every TMDb request
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Language model API key
    #[serde(default)]
    pub llm_api_key: Option<String>,

    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_llm_api_url")]
    pub llm_api_url: String,

    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Maximum number of movies presented to the user
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Server host address (serve mode)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (serve mode)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_llm_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_result_limit() -> usize {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// API keys checked by [`Config::require_api_keys`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeys {
    pub tmdb: String,
    pub llm: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>()
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))
    }

    /// Load configuration from an explicit set of variables
    pub fn from_iter<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))
    }

    /// Returns both API keys, or a config error naming every one that is
    /// missing or blank.
    pub fn require_api_keys(&self) -> AppResult<ApiKeys> {
        let tmdb = non_blank(&self.tmdb_api_key);
        let llm = non_blank(&self.llm_api_key);

        match (tmdb, llm) {
            (Some(tmdb), Some(llm)) => Ok(ApiKeys {
                tmdb: tmdb.to_string(),
                llm: llm.to_string(),
            }),
            (tmdb, llm) => {
                let mut missing = Vec::new();
                if tmdb.is_none() {
                    missing.push("TMDB_API_KEY");
                }
                if llm.is_none() {
                    missing.push("LLM_API_KEY");
                }
                Err(AppError::Config(format!(
                    "missing required environment variable(s): {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
