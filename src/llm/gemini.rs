//! Blocking client for the Gemini `generateContent` endpoint.
//!
//! Behaviour:
//! - One `POST {base_url}/v1beta/{model}:generateContent` per call, no retry.
//! - The API key travels in the `x-goog-api-key` header, never in the URL.
//! - The text parts of the first candidate are concatenated; a reply with no
//!   usable text is reported as `GenerationError::EmptyResponse`.

use std::time::Duration;

use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::llm::generator::{GenerationError, GenerationResult, TextGenerator};

/// Default Gemini API host.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// API version segment of the endpoint path.
const API_VERSION: &str = "v1beta";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connect timeout for the HTTP client.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default timeout for a whole generation request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for the Gemini client.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Service credential.
    pub api_key: SecretString,
    /// Base URL, without the API version.
    pub base_url: String,
    /// Timeout for a whole generation request.
    pub request_timeout: Duration,
    /// Optional cap on generated tokens.
    pub max_output_tokens: Option<u32>,
}

impl GeminiConfig {
    /// Create a config for `api_key` with default endpoint settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_output_tokens: None,
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the output token cap.
    #[must_use]
    pub const fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Blocking Gemini client.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Build a client from `config`.
    ///
    /// Must not be called from inside an async context.
    ///
    /// # Errors
    /// Returns an error if the API key is empty or the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> GenerationResult<Self> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(GenerationError::Config("API key is empty".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint_url(&self, model: &str) -> String {
        endpoint_url(&self.config.base_url, model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str, model: &str) -> GenerationResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: self
                .config
                .max_output_tokens
                .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
        };

        tracing::debug!(model, prompt_chars = prompt.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint_url(model))
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_else(|err| {
                tracing::debug!(model, "could not read error body: {err}");
                format!("<unreadable body: {err}>")
            });
            tracing::warn!(model, status = status.as_u16(), "generateContent failed");
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = extract_text(response.json::<GenerateContentResponse>()?)?;
        tracing::info!(model, response_chars = text.len(), "generateContent succeeded");
        Ok(text)
    }
}

/// Full endpoint URL for `model`; bare model names get the `models/` prefix.
fn endpoint_url(base_url: &str, model: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let model = model.trim_start_matches('/');
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        format!("{base_url}/{API_VERSION}/{model}:generateContent")
    } else {
        format!("{base_url}/{API_VERSION}/models/{model}:generateContent")
    }
}

fn extract_text(response: GenerateContentResponse) -> GenerationResult<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse {
            block_reason: response.prompt_feedback.and_then(|f| f.block_reason),
        });
    }

    Ok(text)
}
