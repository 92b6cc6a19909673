use async_trait::async_trait;
use defectscan_core::{DefectType, ProviderOutcome, Section, TextProvider};

/// Offline provider that answers from the built-in catalog reference notes.
///
/// Output uses the same labeled format a hosted model is asked for, so it
/// runs through the normal parse path.
#[derive(Debug, Default)]
pub struct CatalogProvider;

impl CatalogProvider {
    pub fn new() -> Self {
        Self
    }

    fn render(defect_type: DefectType) -> String {
        let notes = defect_type.reference_notes();
        Section::ALL
            .iter()
            .map(|s| format!("{} {}", s.label(), notes.get(*s)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl TextProvider for CatalogProvider {
    fn name(&self) -> &str {
        "catalog"
    }

    async fn generate(&self, prompt: &str) -> ProviderOutcome {
        // Longest label first, so a name containing another name wins.
        let mut candidates = DefectType::ALL;
        candidates.sort_by_key(|t| std::cmp::Reverse(t.label().len()));

        let found = candidates
            .into_iter()
            .find(|t| prompt.contains(t.label()))
            .ok_or_else(|| anyhow::anyhow!("prompt names no catalog defect type"))?;
        Ok(Self::render(found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defectscan_core::{build_prompt, parse_sections};

    #[tokio::test]
    async fn answers_prompt_with_reference_notes() {
        let provider = CatalogProvider::new();
        let raw = provider
            .generate(&build_prompt(DefectType::Corrosion.label()))
            .await
            .unwrap();

        let sections = parse_sections(raw.as_str());
        assert_eq!(sections.cause, "Exposure to moisture and oxygen");
        assert_eq!(sections.severity, "High");
        assert_eq!(
            sections.prevention,
            "Regular cleaning and application of protective coatings"
        );
    }

    #[tokio::test]
    async fn unknown_defect_type_fails() {
        let provider = CatalogProvider::new();
        assert!(provider.generate(&build_prompt("Dent")).await.is_err());
    }
}
