use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Free-text description of the movie mood the user is after
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VibeQuery(String);

impl VibeQuery {
    /// Trims the input and rejects it when nothing is left
    pub fn new(text: &str) -> AppResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidInput("Vibe cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Search terms the language model derived from a vibe
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Concrete movie titles suggested for the vibe
    #[serde(default)]
    pub titles: Vec<String>,
    /// Free-text search phrases
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Genre names, matched case-insensitively against TMDb genres
    #[serde(default)]
    pub genres: Vec<String>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty() && self.keywords.is_empty() && self.genres.is_empty()
    }

    /// Trims entries, drops blanks and removes case-insensitive duplicates
    pub fn normalized(self) -> Self {
        Self {
            titles: clean(self.titles),
            keywords: clean(self.keywords),
            genres: clean(self.genres),
        }
    }
}

fn clean(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(value.to_lowercase()))
        .collect()
}
