//! OpenAI-compatible note-expansion backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use notely_core::defaults::{
    expand_user_prompt, EXPAND_MAX_TOKENS, EXPAND_MODEL, EXPAND_SYSTEM_PROMPT, EXPAND_TEMPERATURE,
};
use notely_core::{Error, ExpansionBackend, Result};

use crate::types::*;

/// Default OpenAI API endpoint.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for expansion.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: None,
            model: EXPAND_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OpenAI-compatible expansion backend.
///
/// One fixed system prompt, one fixed model, temperature 0.7, 1000-token
/// budget. Deliberately no retry, batching, or streaming: a failed call
/// surfaces to the caller and the user re-submits.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "openai",
            model = %config.model,
            base_url = %config.base_url,
            "Initializing OpenAI backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    ///
    /// | Env Var              | Default                     |
    /// |----------------------|-----------------------------|
    /// | `OPENAI_BASE_URL`    | `https://api.openai.com/v1` |
    /// | `OPENAI_API_KEY`     | (none)                      |
    /// | `OPENAI_MODEL`       | `gpt-4o-mini`               |
    /// | `OPENAI_TIMEOUT`     | `120`                       |
    pub fn from_env() -> Result<Self> {
        let config = OpenAIConfig {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| EXPAND_MODEL.to_string()),
            timeout_seconds: std::env::var("OPENAI_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Self::new(config)
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Build a POST request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }
}

#[async_trait]
impl ExpansionBackend for OpenAIBackend {
    async fn expand(&self, content: &str, title: Option<&str>) -> Result<String> {
        // When the note body is empty the title is all the model has to go
        // on; fold it into the prompt rather than sending an empty string.
        let subject = if content.trim().is_empty() {
            title.unwrap_or_default()
        } else {
            content
        };

        if subject.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Content or title is required".to_string(),
            ));
        }

        debug!(
            subsystem = "inference",
            component = "openai",
            op = "expand",
            model = %self.config.model,
            prompt_len = subject.len(),
            "Expanding note"
        );

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: EXPAND_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: expand_user_prompt(subject),
                },
            ],
            temperature: Some(EXPAND_TEMPERATURE),
            max_tokens: Some(EXPAND_MAX_TOKENS),
        };

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ProviderErrorResponse = response
                .json()
                .await
                .unwrap_or_else(|_| ProviderErrorResponse::unknown());
            return Err(Error::Inference(format!(
                "Provider returned {}: {}",
                status, body.error.message
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let expanded = result
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| Error::Inference("Provider returned no choices".to_string()))?;

        debug!(
            subsystem = "inference",
            component = "openai",
            op = "expand",
            response_len = expanded.len(),
            "Expansion complete"
        );
        Ok(expanded)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAIConfig::default();
        assert_eq!(config.base_url, DEFAULT_OPENAI_URL);
        assert_eq!(config.model, EXPAND_MODEL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_backend_creation() {
        let backend = OpenAIBackend::new(OpenAIConfig::default());
        assert!(backend.is_ok());

        let backend = backend.unwrap();
        assert_eq!(backend.config().base_url, DEFAULT_OPENAI_URL);
        assert_eq!(backend.model_name(), EXPAND_MODEL);
    }

    #[test]
    fn test_custom_config() {
        let config = OpenAIConfig {
            base_url: "http://localhost:8080/v1".to_string(),
            api_key: Some("test-key".to_string()),
            model: "custom-gen".to_string(),
            timeout_seconds: 60,
        };
        let backend = OpenAIBackend::new(config).unwrap();
        assert_eq!(backend.model_name(), "custom-gen");
        assert_eq!(backend.config().api_key.as_deref(), Some("test-key"));
    }

    #[tokio::test]
    async fn test_expand_rejects_empty_input() {
        let backend = OpenAIBackend::new(OpenAIConfig::default()).unwrap();
        let result = backend.expand("", None).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = backend.expand("   ", Some("  ")).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
