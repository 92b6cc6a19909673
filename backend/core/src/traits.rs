use async_trait::async_trait;

/// Result of a single provider call: the raw generated text, or the reason it
/// failed. Consumed immediately by the orchestrator.
pub type ProviderOutcome = anyhow::Result<String>;

/// Trait for generative-text backends used by the analyzer.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send a prompt and return the raw generated text.
    ///
    /// Markdown in the response is returned untouched.
    async fn generate(&self, prompt: &str) -> ProviderOutcome;
}
