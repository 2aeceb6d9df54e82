use std::time::Duration;

use async_trait::async_trait;
use marketmind_core::config::LlmConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The completion provider: one prompt in, one block of text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CompletionError>;
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("could not build completion client: {0}")]
    Setup(String),
    #[error("completion request failed: {0}")]
    Transport(String),
    #[error("completion provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion response could not be decoded: {0}")]
    InvalidBody(String),
    #[error("completion response contained no choices")]
    EmptyChoices,
}

/// Client for any endpoint speaking the OpenAI chat-completions format
/// (Groq, OpenAI, Ollama's compatibility layer).
pub struct ChatCompletionsClient {
    http: Client,
    endpoint: String,
    api_key: Option<SecretString>,
    model: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| CompletionError::Setup(error.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.resolved_base_url().trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CompletionError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage { role: "user", content: prompt }],
            temperature: self.temperature,
            max_tokens,
        };

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response =
            request.send().await.map_err(|error| CompletionError::Transport(error.to_string()))?;
        let status = response.status();
        let text =
            response.text().await.map_err(|error| CompletionError::Transport(error.to_string()))?;

        if !status.is_success() {
            return Err(CompletionError::Status { status: status.as_u16(), body: truncate(&text, 512) });
        }

        parse_completion(&text)
    }
}

fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|error| CompletionError::InvalidBody(error.to_string()))?;
    let choice = response.choices.into_iter().next().ok_or(CompletionError::EmptyChoices)?;
    Ok(choice.message.content.unwrap_or_default().trim().to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}…", &text[..index]),
        None => text.to_string(),
    }
}
