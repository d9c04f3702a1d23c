/// OpenAI-compatible chat completions provider
///
/// Works against api.openai.com and any server exposing the same
/// `/v1/chat/completions` shape (local inference servers, gateways).
use crate::{
    error::{AppError, AppResult},
    models::{SearchCriteria, VibeQuery},
    services::llm::{parse_criteria, system_prompt, LanguageModel},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 400;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize, Debug)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Clone)]
pub struct OpenAiCompatibleModel {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiCompatibleModel {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }

    /// Send the vibe and return the first choice's text, if any
    async fn complete(&self, vibe: &VibeQuery) -> AppResult<Option<String>> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(system_prompt()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(vibe.as_str().to_string()),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Language model API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw language model response");

        let chat: ChatResponse = match serde_json::from_str(&response_text) {
            Ok(chat) => chat,
            Err(e) => {
                tracing::warn!(error = %e, "Language model response was not a chat completion");
                return Ok(None);
            }
        };

        Ok(chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content))
    }
}

#[async_trait::async_trait]
impl LanguageModel for OpenAiCompatibleModel {
    async fn derive_criteria(&self, vibe: &VibeQuery) -> AppResult<SearchCriteria> {
        let Some(content) = self.complete(vibe).await? else {
            tracing::warn!(provider = self.name(), "Language model returned no content");
            return Ok(SearchCriteria::default());
        };

        let criteria = parse_criteria(&content);

        tracing::info!(
            vibe = %vibe.as_str(),
            titles = criteria.titles.len(),
            keywords = criteria.keywords.len(),
            genres = criteria.genres.len(),
            provider = self.name(),
            "Criteria derived"
        );

        Ok(criteria)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
