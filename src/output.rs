use std::fmt::Write;

use crate::{
    error::{AppError, AppResult},
    models::{Movie, Recommendations},
};

const OVERVIEW_MAX_CHARS: usize = 160;

pub const NO_MATCHES: &str = "No movies matched that vibe.";

/// Numbered console listing of the recommended movies
pub fn render_text(recommendations: &Recommendations) -> String {
    if recommendations.movies.is_empty() {
        return format!("{}\n", NO_MATCHES);
    }

    let mut out = String::new();
    for (index, movie) in recommendations.movies.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, headline(movie));
        if let Some(overview) = &movie.overview {
            let _ = writeln!(out, "   {}", shorten(overview, OVERVIEW_MAX_CHARS));
        }
    }
    out
}

/// Pretty-printed JSON of the full result, criteria included
pub fn render_json(recommendations: &Recommendations) -> AppResult<String> {
    serde_json::to_string_pretty(recommendations)
        .map_err(|e| AppError::Internal(format!("Failed to serialize recommendations: {}", e)))
}

fn headline(movie: &Movie) -> String {
    let mut line = movie.title.clone();
    if let Some(year) = movie.release_year() {
        let _ = write!(line, " ({})", year);
    }
    // TMDb reports 0.0 for titles nobody has voted on yet
    if let Some(rating) = movie.vote_average.filter(|r| *r > 0.0) {
        let _ = write!(line, "  ★ {:.1}", rating);
    }
    line
}

fn shorten(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
