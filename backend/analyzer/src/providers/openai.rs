use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use defectscan_core::{ProviderOutcome, ScanError, TextProvider};

use super::unavailable::UnavailableProvider;
use super::ProviderConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible chat completions provider.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: 1024,
            temperature: 0.4,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build from config, or an unavailable stand-in when no key is set.
    pub fn from_config(config: &ProviderConfig) -> Arc<dyn TextProvider> {
        let Some(key) = config.key() else {
            return Arc::new(UnavailableProvider::new("openai", "OPENAI_API_KEY is not set"));
        };
        let mut provider = Self::new(key);
        if let Some(model) = &config.model {
            provider = provider.with_model(model);
        }
        if let Some(url) = &config.base_url {
            provider = provider.with_base_url(url);
        }
        Arc::new(provider)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

fn extract_content(response: ChatResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .context("OpenAI response contained no choices")?
        .message
        .content
        .unwrap_or_default();
    if content.trim().is_empty() {
        anyhow::bail!("OpenAI returned an empty message");
    }
    Ok(content)
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> ProviderOutcome {
        let start = Instant::now();

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        };

        debug!(model = %self.model, "Sending request to OpenAI");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("OpenAI HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ScanError::Provider {
                provider: "openai".to_string(),
                message: format!("OpenAI returned {}: {}", status, error_body),
            }
            .into());
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI response")?;
        let content = extract_content(chat_response)?;

        debug!(
            model = %self.model,
            latency_ms = start.elapsed().as_millis() as u64,
            "OpenAI responded"
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn returns_first_choice_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJsonString(
                r#"{"model":"gpt-4o-mini","messages":[{"role":"user","content":"hello"}]}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"CAUSE: Impact. SEVERITY: High"}}]}"#,
            )
            .create_async()
            .await;

        let provider = OpenAiProvider::new("sk-test").with_base_url(server.url());
        let text = provider.generate("hello").await.unwrap();

        assert_eq!(text, "CAUSE: Impact. SEVERITY: High");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"invalid api key"}}"#)
            .create_async()
            .await;

        let provider = OpenAiProvider::new("sk-test").with_base_url(server.url());
        let err = provider.generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn malformed_body_is_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("not json")
            .create_async()
            .await;

        let provider = OpenAiProvider::new("sk-test").with_base_url(server.url());
        assert!(provider.generate("hello").await.is_err());
    }

    #[tokio::test]
    async fn config_overrides_model() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJsonString(r#"{"model":"gpt-4.1"}"#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"ok"}}]}"#)
            .create_async()
            .await;

        let config = ProviderConfig {
            api_key: Some("sk-test".into()),
            model: Some("gpt-4.1".into()),
            base_url: Some(server.url()),
        };
        let provider = OpenAiProvider::from_config(&config);
        assert_eq!(provider.generate("hello").await.unwrap(), "ok");
        mock.assert_async().await;
    }
}
