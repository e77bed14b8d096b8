//! Mock expansion backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use notely_inference::mock::MockExpansionBackend;
//!
//! #[tokio::test]
//! async fn test_with_mock_backend() {
//!     let backend = MockExpansionBackend::new().with_fixed_response("Expanded text");
//!     let expanded = backend.expand("buy milk", None).await.unwrap();
//!     assert_eq!(expanded, "Expanded text");
//! }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use notely_core::{Error, ExpansionBackend, Result};

/// A single recorded call to the mock backend.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub content: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    fixed_response: Option<String>,
    fail_with: Option<String>,
}

/// Mock expansion backend for testing.
#[derive(Clone)]
pub struct MockExpansionBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl Default for MockExpansionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExpansionBackend {
    /// Create a new mock backend.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig {
                fixed_response: None,
                fail_with: None,
            }),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always return the given response.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).fixed_response = Some(response.into());
        self
    }

    /// Always fail with an inference error carrying the given message.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).fail_with = Some(message.into());
        self
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExpansionBackend for MockExpansionBackend {
    async fn expand(&self, content: &str, title: Option<&str>) -> Result<String> {
        self.call_log.lock().unwrap().push(MockCall {
            content: content.to_string(),
            title: title.map(String::from),
        });

        if let Some(message) = &self.config.fail_with {
            return Err(Error::Inference(message.clone()));
        }

        if content.trim().is_empty() && title.map_or(true, |t| t.trim().is_empty()) {
            return Err(Error::InvalidInput(
                "Content or title is required".to_string(),
            ));
        }

        Ok(self
            .config
            .fixed_response
            .clone()
            .unwrap_or_else(|| format!("Expanded: {}", content)))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response_echoes_content() {
        let backend = MockExpansionBackend::new();
        let expanded = backend.expand("buy milk", None).await.unwrap();
        assert_eq!(expanded, "Expanded: buy milk");
    }

    #[tokio::test]
    async fn test_fixed_response() {
        let backend = MockExpansionBackend::new().with_fixed_response("canned");
        let expanded = backend.expand("anything", Some("title")).await.unwrap();
        assert_eq!(expanded, "canned");
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let backend = MockExpansionBackend::new().with_failure("provider down");
        let result = backend.expand("note", None).await;
        assert!(matches!(result, Err(Error::Inference(msg)) if msg == "provider down"));
    }

    #[tokio::test]
    async fn test_call_log_records_inputs() {
        let backend = MockExpansionBackend::new();
        backend.expand("a", Some("t")).await.unwrap();
        backend.expand("b", None).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].content, "a");
        assert_eq!(calls[0].title.as_deref(), Some("t"));
        assert_eq!(calls[1].title, None);
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let backend = MockExpansionBackend::new();
        let result = backend.expand("", None).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
