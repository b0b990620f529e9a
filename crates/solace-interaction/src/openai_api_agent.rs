//! OpenAI completion provider - direct REST calls to the Chat Completions API.
//!
//! Configuration priority: ~/.config/solace/secret.json > environment variables

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use solace_core::config::SecretConfig;
use solace_core::message::MessageRole;
use solace_core::{CompletionProvider, CompletionRequest, Result, SolaceError};
use solace_infrastructure::{SecretStorage, SecretStorageError};
use std::env;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Completion provider backed by the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiCompletionProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
}

impl std::fmt::Debug for OpenAiCompletionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompletionProvider")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompletionProvider {
    /// Creates a provider with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Loads credentials from ~/.config/solace/secret.json or environment variables.
    ///
    /// Priority:
    /// 1. ~/.config/solace/secret.json
    /// 2. Environment variables (OPENAI_API_KEY, OPENAI_MODEL_NAME)
    ///
    /// Model name defaults to `gpt-4o-mini` if not specified.
    pub fn try_from_env() -> Result<Self> {
        let secret = SecretStorage::new()
            .ok()
            .and_then(|storage| load_secret(&storage));

        Self::from_sources(
            secret,
            env::var("OPENAI_API_KEY").ok(),
            env::var("OPENAI_MODEL_NAME").ok(),
        )
    }

    /// Resolves credentials from an optional secret file and environment values.
    pub fn from_sources(
        secret: Option<SecretConfig>,
        env_api_key: Option<String>,
        env_model: Option<String>,
    ) -> Result<Self> {
        if let Some(openai) = secret.and_then(|config| config.openai) {
            if !openai.api_key.trim().is_empty() {
                let model = openai
                    .model_name
                    .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());
                return Ok(Self::new(openai.api_key, model));
            }
        }

        let api_key = env_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SolaceError::config(
                    "OPENAI_API_KEY not found in ~/.config/solace/secret.json or environment variables",
                )
            })?;
        let model = env_model.unwrap_or_else(|| DEFAULT_OPENAI_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    /// Points the provider at a different endpoint (proxies, local gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_body(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.turns.len() + 1);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: request.system_instruction.clone(),
        });
        messages.extend(request.turns.iter().map(|turn| ChatMessage {
            role: match turn.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            }
            .to_string(),
            content: turn.content.clone(),
        }));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<String> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                SolaceError::provider(
                    None,
                    format!("OpenAI API request failed: {err}"),
                    err.is_connect() || err.is_timeout(),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let body_text = response.text().await.map_err(|err| {
            SolaceError::provider(None, format!("Failed to read OpenAI response: {err}"), true)
        })?;

        parse_response_body(&body_text)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = self.build_body(request);
        tracing::info!(model = %self.model, turns = body.messages.len(), "Requesting completion");

        let result = self.send_request(&body).await;
        if let Err(err) = &result {
            tracing::error!(model = %self.model, error = %err, "Completion failed");
        }
        result
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn parse_response_body(body: &str) -> Result<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|err| {
        SolaceError::provider(None, format!("Failed to parse OpenAI response: {err}"), false)
    })?;
    extract_text_response(parsed)
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| {
            SolaceError::provider(None, "OpenAI API returned no content in the response", false)
        })
}

/// Reads secret.json, treating a missing file as "no secret".
///
/// Any other failure is logged and the caller falls back to the environment.
fn load_secret(storage: &SecretStorage) -> Option<SecretConfig> {
    match storage.load() {
        Ok(config) => Some(config),
        Err(SecretStorageError::NotFound(_)) => None,
        Err(err) => {
            tracing::warn!(
                path = %storage.path().display(),
                error = %err,
                "Ignoring unreadable secret.json, falling back to environment"
            );
            None
        }
    }
}

fn map_http_error(status: StatusCode, body: String) -> SolaceError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    let retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    SolaceError::provider(Some(status.as_u16()), message, retryable)
}
