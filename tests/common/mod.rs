//! Shared fixtures for the integration tests
//!
//! Both external services are served by a single `wiremock` server: the
//! language model under `/v1/chat/completions` and TMDb under `/3`.

#![allow(dead_code)]

use serde_json::{json, Value};
use vibe_movies::Config;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TMDB_KEY: &str = "tmdb-test-key";
pub const LLM_KEY: &str = "llm-test-key";

/// Config pointing both services at the mock server
pub fn config_for(server: &MockServer) -> Config {
    config_with(server, &[("TMDB_API_KEY", TMDB_KEY), ("LLM_API_KEY", LLM_KEY)])
}

/// Config pointing at the mock server with only the given extra variables
pub fn config_with(server: &MockServer, extra: &[(&str, &str)]) -> Config {
    let mut vars = vec![
        ("TMDB_API_URL".to_string(), format!("{}/3", server.uri())),
        (
            "LLM_API_URL".to_string(),
            format!("{}/v1/chat/completions", server.uri()),
        ),
        ("LLM_MODEL".to_string(), "test-model".to_string()),
    ];
    vars.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
    Config::from_iter(vars).unwrap()
}

/// TMDb base URL nothing listens on (discard port)
pub const UNREACHABLE_TMDB_URL: &str = "http://127.0.0.1:9/3";

/// Chat completion body whose first choice carries `content`
pub fn chat_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

pub async fn mount_llm_reply(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", format!("Bearer {}", LLM_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(content)))
        .mount(server)
        .await;
}

/// A TMDb movie list entry
pub fn tmdb_movie(id: u64, title: &str, release_date: &str) -> Value {
    json!({
        "adult": false,
        "id": id,
        "title": title,
        "original_title": title,
        "overview": format!("{} overview.", title),
        "release_date": release_date,
        "vote_average": 7.5,
        "genre_ids": [18]
    })
}

pub fn tmdb_page(results: Vec<Value>) -> Value {
    json!({
        "page": 1,
        "total_pages": 1,
        "total_results": results.len(),
        "results": results
    })
}
