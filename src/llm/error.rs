use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("No API key configured")]
    MissingApiKey,
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Content blocked by the model: {0}")]
    ContentBlocked(String),
    #[error("Model returned no text")]
    EmptyCompletion,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Provider error (HTTP {status}): {message}")]
    Provider { status: u16, message: String },
}

impl GenerationError {
    /// Short tag used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::MissingApiKey => "missing_api_key",
            GenerationError::Authentication(_) => "authentication",
            GenerationError::RateLimited => "rate_limited",
            GenerationError::Network(_) => "network",
            GenerationError::ContentBlocked(_) => "content_blocked",
            GenerationError::EmptyCompletion => "empty_completion",
            GenerationError::InvalidResponse(_) => "invalid_response",
            GenerationError::Provider { .. } => "provider",
        }
    }

    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = body.trim().to_string();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                GenerationError::Authentication(message)
            }
            StatusCode::BAD_REQUEST if mentions_invalid_key(body) => {
                GenerationError::Authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => GenerationError::RateLimited,
            _ => GenerationError::Provider {
                status: status.as_u16(),
                message,
            },
        }
    }
}

// Gemini answers a bad key with 400 rather than 401.
fn mentions_invalid_key(body: &str) -> bool {
    body.contains("API_KEY_INVALID") || body.contains("API key not valid")
}
