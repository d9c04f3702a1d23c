use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use std::fmt::Write;

use crate::{error::AppResult, models::Recommendations};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct PreferencesForm {
    pub preferences: String,
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Movie vibes</title></head>
<body>
<h1>What are you in the mood for?</h1>
<form method="post" action="/">
  <textarea name="preferences" rows="4" cols="60" placeholder="cozy rainy sunday, a bit of mystery"></textarea>
  <br>
  <button type="submit">Recommend</button>
</form>
</body>
</html>
"#;

/// Preferences form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Form submission: one recommendation cycle rendered as a results page
pub async fn results(
    State(state): State<AppState>,
    Form(form): Form<PreferencesForm>,
) -> AppResult<Html<String>> {
    let recommendations = state.recommender.recommend(&form.preferences, None).await?;
    Ok(Html(render_results(&recommendations)))
}

fn render_results(recommendations: &Recommendations) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n");
    page.push_str("<head><meta charset=\"utf-8\"><title>Recommendations</title></head>\n<body>\n");
    let _ = writeln!(
        page,
        "<h1>Movies for &ldquo;{}&rdquo;</h1>",
        escape(&recommendations.vibe)
    );

    if recommendations.movies.is_empty() {
        let _ = writeln!(page, "<p>{}</p>", crate::output::NO_MATCHES);
    } else {
        page.push_str("<ol>\n");
        for movie in &recommendations.movies {
            let _ = write!(page, "<li><strong>{}</strong>", escape(&movie.title));
            if let Some(year) = movie.release_year() {
                let _ = write!(page, " ({})", year);
            }
            if let Some(overview) = &movie.overview {
                let _ = write!(page, "<p>{}</p>", escape(overview));
            }
            page.push_str("</li>\n");
        }
        page.push_str("</ol>\n");
    }

    page.push_str("<p><a href=\"/\">Try another vibe</a></p>\n</body>\n</html>\n");
    page
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
