/// Language model abstraction
///
/// A language model turns a free-text vibe into structured search criteria.
/// Providers only differ in transport; prompt wording and response extraction
/// are shared so every backend degrades the same way on odd output.
use crate::{
    error::AppResult,
    models::{SearchCriteria, VibeQuery},
};

pub mod openai;

pub use openai::OpenAiCompatibleModel;

/// Upper bound on each list the model is asked to produce
pub const MAX_SUGGESTIONS: usize = 5;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    /// Derive search criteria for a vibe
    ///
    /// Transport failures and non-success statuses are errors. Content that
    /// cannot be read as criteria yields empty criteria instead.
    async fn derive_criteria(&self, vibe: &VibeQuery) -> AppResult<SearchCriteria>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// System prompt sent ahead of the user's vibe
pub fn system_prompt() -> String {
    format!(
        "You help people pick a movie to watch. The user describes the mood or vibe they are in. \
         Reply with a single JSON object and nothing else, shaped as \
         {{\"titles\": [string], \"keywords\": [string], \"genres\": [string]}}. \
         \"titles\" holds up to {max} existing feature films that fit the vibe, by their original release title. \
         \"keywords\" holds up to {max} short search phrases describing the plot or setting. \
         \"genres\" holds up to 3 standard movie genre names such as Comedy, Drama, Horror or Science Fiction. \
         Use empty arrays when unsure.",
        max = MAX_SUGGESTIONS
    )
}

/// Extract criteria from raw model output
///
/// Accepts bare JSON, JSON wrapped in markdown fences, or JSON surrounded by
/// prose. Anything else yields empty criteria.
pub fn parse_criteria(content: &str) -> SearchCriteria {
    let Some(json) = outermost_object(strip_code_fences(content)) else {
        tracing::warn!(content = %content, "Language model reply contained no JSON object");
        return SearchCriteria::default();
    };

    match serde_json::from_str::<SearchCriteria>(json) {
        Ok(criteria) => {
            let mut criteria = criteria.normalized();
            criteria.titles.truncate(MAX_SUGGESTIONS);
            criteria.keywords.truncate(MAX_SUGGESTIONS);
            criteria.genres.truncate(MAX_SUGGESTIONS);
            criteria
        }
        Err(e) => {
            tracing::warn!(error = %e, content = %content, "Failed to parse language model reply");
            SearchCriteria::default()
        }
    }
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") on the opening fence line
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn outermost_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (start < end).then(|| &content[start..=end])
}
