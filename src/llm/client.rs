use anyhow::{Context, Result, anyhow};
use reqwest::Client as HttpClient;
use tracing::{debug, instrument};

use super::error::GenerationError;
use super::models::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, SafetySetting,
    permissive_safety_settings,
};
use super::secrets::{API_KEY_ENV, ApiKeySource, get_api_key_from_sources};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const MODEL_ENV: &str = "LYRICS_MAKER_MODEL";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Everything the client needs, built once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub generation: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            generation: GenerationConfig::default(),
            safety_settings: permissive_safety_settings(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reads the key from the environment or the auth file. A missing key is
    /// kept as an empty string and only reported on the first request.
    pub fn from_sources(model_override: Option<String>) -> Result<Self> {
        let lookup = get_api_key_from_sources()?;
        if lookup.api_key.is_none() {
            debug!(
                "no API key in {} or the auth file; generation will fail",
                API_KEY_ENV
            );
        }
        let model = model_override
            .or_else(|| std::env::var(MODEL_ENV).ok())
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self::new(lookup.api_key.unwrap_or_default()).with_model(model))
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: ClientConfig,
    http_client: HttpClient,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http_client: HttpClient::new(),
        }
    }

    pub fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: self.config.generation,
            safety_settings: self.config.safety_settings.clone(),
        }
    }

    /// Sends one prompt and returns the raw completion text.
    #[instrument(skip_all, fields(model = %self.config.model))]
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if self.config.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        debug!(prompt_chars = prompt.len(), "sending generation request");

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, &error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        completion_text(parsed)
    }

    /// Lists models to check that the configured key is accepted.
    pub async fn healthcheck(&self) -> Result<()> {
        if self.config.api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey.into());
        }
        let response = self
            .http_client
            .get(format!("{}/models", self.config.base_url))
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))
            .context("Failed to reach the Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_status(status, &error_text))
                .context("Failed to validate API key with Gemini");
        }
        Ok(())
    }
}

/// Joins the text parts of the first candidate.
pub fn completion_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(GenerationError::ContentBlocked(reason));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyCompletion);
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                Err(GenerationError::ContentBlocked(reason.to_string()))
            }
            _ => Err(GenerationError::EmptyCompletion),
        };
    }

    Ok(text)
}

pub async fn test_configured_api_key() -> Result<ApiKeySource> {
    let lookup = get_api_key_from_sources()?;
    let disabled = || {
        anyhow!(
            "No API key configured. Set {} or run `lyrics-maker key --set <KEY>`.",
            API_KEY_ENV
        )
    };
    let key = lookup.api_key.ok_or_else(disabled)?;
    let source = lookup.source.ok_or_else(disabled)?;

    let client = GeminiClient::new(ClientConfig::new(key));
    client.healthcheck().await?;
    Ok(source)
}
