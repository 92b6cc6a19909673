use async_trait::async_trait;
use defectscan_core::{ProviderOutcome, ScanError, TextProvider};

/// Placeholder for an adapter that could not be initialised.
///
/// Keeps its slot in the fallback chain so the next provider is tried.
pub struct UnavailableProvider {
    name: String,
    reason: String,
}

impl UnavailableProvider {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TextProvider for UnavailableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &str) -> ProviderOutcome {
        Err(ScanError::ProviderUnavailable {
            provider: self.name.clone(),
            reason: self.reason.clone(),
        }
        .into())
    }
}
