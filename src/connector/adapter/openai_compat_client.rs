use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{ChatResponse, DomainError, Generation, Prompt, TokenUsage};

/// Default target: LM Studio running locally on its standard port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1234";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// Default model matches the LM Studio local-first default.
const DEFAULT_MODEL: &str = "ministral-3b-2512";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// OpenAI chat completions request payload.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Minimal subset of the chat completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

/// HTTP client for any OpenAI-compatible chat completions endpoint (OpenAI,
/// LM Studio, Groq, vLLM, …).
///
/// Implements [`ChatClient`] so [`crate::ConversationService`] stays decoupled
/// from transport and serialization details.
///
/// **Local-first defaults**: targets LM Studio on `http://localhost:1234`
/// without an API key. Override via environment variables to target a cloud
/// endpoint:
///
/// ```text
/// OPENAI_BASE_URL=https://api.openai.com
/// OPENAI_API_KEY=sk-...
/// OPENAI_MODEL=gpt-4o-mini
/// ```
///
/// When the prompt's options name a model, that model is sent; otherwise the
/// client's configured model is used.
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiCompatClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Construct from environment variables with local-first defaults:
    ///
    /// | Variable          | Default                 | Purpose                |
    /// |-------------------|-------------------------|------------------------|
    /// | `OPENAI_BASE_URL` | `http://localhost:1234` | LM Studio / any server |
    /// | `OPENAI_MODEL`    | `ministral-3b-2512`     | Model identifier       |
    /// | `OPENAI_API_KEY`  | `""` (empty)            | Not required for local |
    pub fn from_env() -> Self {
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        Self::new(key, model, base)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request<'a>(&'a self, prompt: &'a Prompt) -> ApiRequest<'a> {
        let options = prompt.options();
        ApiRequest {
            model: options.model().unwrap_or(&self.model),
            messages: prompt
                .messages()
                .iter()
                .map(|m| ApiMessage {
                    role: m.role().as_str(),
                    content: m.content(),
                })
                .collect(),
            temperature: options.temperature(),
            max_tokens: options.max_tokens(),
            top_p: options.top_p(),
            frequency_penalty: options.frequency_penalty(),
            presence_penalty: options.presence_penalty(),
            stop: options.stop(),
        }
    }
}

#[async_trait]
impl ChatClient for OpenAiCompatClient {
    async fn call(&self, prompt: &Prompt) -> Result<ChatResponse, DomainError> {
        let request = self.build_request(prompt);

        debug!(
            "OpenAiCompatClient: sending {} messages to {} (model={})",
            request.messages.len(),
            self.url,
            request.model,
        );

        let mut builder = self.client.post(&self.url).json(&request);
        if !self.api_key.is_empty() {
            builder = builder.header("Authorization", format!("Bearer {}", self.api_key));
        }

        let response = builder.send().await.map_err(|e| {
            DomainError::upstream(format!("OpenAiCompatClient: request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiCompatClient: API returned {status}: {body}");
            return Err(DomainError::upstream(format!(
                "OpenAiCompatClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("OpenAiCompatClient: failed to parse response: {e}"))
        })?;

        let generations: Vec<Generation> = api_response
            .choices
            .into_iter()
            .map(|choice| {
                let generation = Generation::new(choice.message.content);
                match choice.finish_reason {
                    Some(reason) => generation.with_finish_reason(reason),
                    None => generation,
                }
            })
            .collect();

        let mut chat_response = ChatResponse::new(generations);
        if let Some(model) = api_response.model {
            chat_response = chat_response.with_model(model);
        }
        if let Some(usage) = api_response.usage {
            chat_response = chat_response.with_usage(TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            });
        }

        Ok(chat_response)
    }
}
