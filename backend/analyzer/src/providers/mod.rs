pub mod catalog;
pub mod gemini;
pub mod mock;
pub mod openai;
pub mod unavailable;

use std::collections::HashMap;
use std::sync::Arc;

use defectscan_core::TextProvider;

/// Connection settings for one hosted provider.
///
/// A missing `api_key` means the adapter is unavailable; `from_config`
/// constructors turn that into an [`unavailable::UnavailableProvider`].
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// The API key, treating blank values as absent.
    pub(crate) fn key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Registry of text providers, looked up by name.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn TextProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider under its own name.
    pub fn register(&mut self, provider: Arc<dyn TextProvider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    /// Get providers matching the given names (in order).
    /// Unknown names are silently skipped.
    pub fn get_providers(&self, names: &[String]) -> Vec<Arc<dyn TextProvider>> {
        names
            .iter()
            .filter_map(|name| self.providers.get(name.trim()).cloned())
            .collect()
    }

    /// Get all registered provider names.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;

    #[test]
    fn test_registry_get_providers_in_requested_order() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(MockProvider::new("gemini")));
        registry.register(Arc::new(MockProvider::new("openai")));

        let providers = registry.get_providers(&[
            "openai".into(),
            "missing".into(),
            "gemini".into(),
        ]);
        let names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["openai", "gemini"]);
        assert_eq!(registry.list(), vec!["gemini", "openai"]);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        assert_eq!(ProviderConfig::with_key("  ").key(), None);
        assert_eq!(ProviderConfig::default().key(), None);
        assert_eq!(ProviderConfig::with_key("abc").key(), Some("abc"));
    }
}
