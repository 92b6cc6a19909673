use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use defectscan_core::{build_prompt, parse_sections, AnalysisSections, TextProvider};
use defectscan_logging::redact_sensitive_data;

use crate::providers::ProviderRegistry;

/// Ordered provider chain for one defect explanation, primary first.
///
/// Providers are tried one at a time, once each, in chain order. The first
/// success is parsed and returned. If every provider fails the caller gets
/// [`AnalysisSections::unavailable`]; `analyze` never errors.
pub struct FallbackAnalyzer {
    chain: Vec<Arc<dyn TextProvider>>,
}

impl FallbackAnalyzer {
    pub fn new(primary: Arc<dyn TextProvider>) -> Self {
        Self {
            chain: vec![primary],
        }
    }

    pub fn then(mut self, fallback: Arc<dyn TextProvider>) -> Self {
        self.chain.push(fallback);
        self
    }

    /// Build a chain from registry names, in the given order.
    pub fn from_registry(registry: &ProviderRegistry, order: &[String]) -> Self {
        Self {
            chain: registry.get_providers(order),
        }
    }

    /// Provider names in attempt order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.chain.iter().map(|p| p.name()).collect()
    }

    /// Request an explanation of `defect_type` and parse it into sections.
    pub async fn analyze(&self, defect_type: &str) -> AnalysisSections {
        let prompt = build_prompt(defect_type);
        let start = Instant::now();

        for provider in &self.chain {
            let name = provider.name();
            debug!(provider = %name, defect_type = %defect_type, "Calling provider");

            match provider.generate(&prompt).await {
                Ok(raw) => {
                    info!(
                        provider = %name,
                        defect_type = %defect_type,
                        latency_ms = start.elapsed().as_millis() as u64,
                        "Provider responded"
                    );
                    return parse_sections(raw.as_str());
                }
                Err(e) => {
                    warn!(
                        provider = %name,
                        defect_type = %defect_type,
                        error = %redact_sensitive_data(&format!("{e:#}")),
                        "Provider failed"
                    );
                }
            }
        }

        error!(
            defect_type = %defect_type,
            providers = self.chain.len(),
            "All providers failed, returning unavailable analysis"
        );
        AnalysisSections::unavailable()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::providers::mock::MockProvider;
    use crate::providers::unavailable::UnavailableProvider;

    const WELL_FORMED: &str =
        "CAUSE: Fatigue. PREVENTION: Inspect often. SOLUTION: Replace part. SEVERITY: High";

    #[tokio::test]
    async fn primary_success_skips_fallback() {
        let a = Arc::new(MockProvider::new("a").with_response(WELL_FORMED));
        let b = Arc::new(MockProvider::new("b").with_response("CAUSE: other"));
        let analyzer = FallbackAnalyzer::new(a.clone()).then(b.clone());

        let sections = analyzer.analyze("Corrosion").await;

        assert_eq!(sections.cause, "Fatigue.");
        assert_eq!(sections.severity, "High");
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 0);
    }

    #[tokio::test]
    async fn primary_failure_falls_back_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = Arc::new(
            MockProvider::new("a")
                .failing("quota exceeded")
                .with_call_log(log.clone()),
        );
        let b = Arc::new(
            MockProvider::new("b")
                .with_response("CAUSE: From B. SEVERITY: Low")
                .with_call_log(log.clone()),
        );
        let analyzer = FallbackAnalyzer::new(a.clone()).then(b.clone());

        let sections = analyzer.analyze("Paint Peeling").await;

        assert_eq!(sections.cause, "From B.");
        assert_eq!(sections.severity, "Low");
        assert_eq!(*log.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn unconfigured_primary_falls_back() {
        let a = Arc::new(UnavailableProvider::new("gemini", "GEMINI_API_KEY is not set"));
        let b = Arc::new(MockProvider::new("openai").with_response(WELL_FORMED));
        let analyzer = FallbackAnalyzer::new(a).then(b.clone());

        let sections = analyzer.analyze("Surface Crack").await;

        assert_eq!(sections.solution, "Replace part.");
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn both_failing_returns_unavailable() {
        let a = Arc::new(MockProvider::new("a").failing("401 unauthorized"));
        let b = Arc::new(MockProvider::new("b").failing("500 internal"));
        let analyzer = FallbackAnalyzer::new(a.clone()).then(b.clone());

        let sections = analyzer.analyze("Corrosion").await;

        assert_eq!(sections, AnalysisSections::unavailable());
        assert_eq!(a.calls(), 1);
        assert_eq!(b.calls(), 1);
    }

    #[tokio::test]
    async fn empty_chain_returns_unavailable() {
        let registry = ProviderRegistry::new();
        let analyzer = FallbackAnalyzer::from_registry(&registry, &["gemini".into()]);
        assert!(analyzer.provider_names().is_empty());
        assert!(analyzer.analyze("Corrosion").await.is_unavailable());
    }

    #[tokio::test]
    async fn unlabeled_success_is_not_retried() {
        let a = Arc::new(MockProvider::new("a").with_response("Sorry, no idea."));
        let b = Arc::new(MockProvider::new("b").with_response(WELL_FORMED));
        let analyzer = FallbackAnalyzer::new(a).then(b.clone());

        let sections = analyzer.analyze("Corrosion").await;

        assert!(sections.is_unavailable());
        assert_eq!(b.calls(), 0);
    }
}
