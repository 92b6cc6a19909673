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

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Google Gemini `generateContent` provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
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
            return Arc::new(UnavailableProvider::new("gemini", "GEMINI_API_KEY is not set"));
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
struct GenerateRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

fn extract_text(response: GenerateResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .context("Gemini response contained no candidates")?;
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        anyhow::bail!("Gemini returned an empty candidate");
    }
    Ok(text)
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> ProviderOutcome {
        let start = Instant::now();
        let body = GenerateRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiRequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, "Sending request to Gemini");

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .context("Gemini HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ScanError::Provider {
                provider: "gemini".to_string(),
                message: format!("Gemini returned {}: {}", status, error_body),
            }
            .into());
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;
        let text = extract_text(parsed)?;

        debug!(
            model = %self.model,
            latency_ms = start.elapsed().as_millis() as u64,
            "Gemini responded"
        );
        Ok(text)
    }
}
