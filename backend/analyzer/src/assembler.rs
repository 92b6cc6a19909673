use std::sync::Arc;

use rand::Rng;
use tracing::info;

use defectscan_core::{AnalysisResult, DefectRecord, DefectType};

use crate::fallback::FallbackAnalyzer;

/// Most defects reported for one image.
const MAX_DEFECTS: usize = 2;

/// Builds the full analysis result for one uploaded image.
///
/// Defect types are drawn at random from the catalog; only their explanations
/// come from providers.
pub struct DefectAssembler {
    analyzer: Arc<FallbackAnalyzer>,
}

impl DefectAssembler {
    pub fn new(analyzer: Arc<FallbackAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Assemble an analysis using the thread-local RNG.
    pub async fn assemble_analysis(&self, uploaded_file_path: &str) -> AnalysisResult {
        // ThreadRng is !Send, so all draws happen before the first await.
        let picks = draw_defect_types(&mut rand::thread_rng());
        self.assemble(uploaded_file_path, picks).await
    }

    /// Assemble an analysis with a caller-supplied RNG.
    pub async fn assemble_analysis_with_rng<R: Rng>(
        &self,
        uploaded_file_path: &str,
        rng: &mut R,
    ) -> AnalysisResult {
        let picks = draw_defect_types(rng);
        self.assemble(uploaded_file_path, picks).await
    }

    async fn assemble(&self, uploaded_file_path: &str, picks: Vec<DefectType>) -> AnalysisResult {
        info!(
            file_path = %uploaded_file_path,
            defect_count = picks.len(),
            "Assembling analysis"
        );

        let mut defects = Vec::with_capacity(picks.len());
        for defect_type in picks {
            let sections = self.analyzer.analyze(defect_type.label()).await;
            defects.push(DefectRecord::new(defect_type.label(), sections));
        }

        AnalysisResult {
            success: true,
            file_path: uploaded_file_path.to_string(),
            defects,
        }
    }
}

/// Pick 1..=MAX_DEFECTS catalog entries, independently and with repeats.
pub fn draw_defect_types<R: Rng>(rng: &mut R) -> Vec<DefectType> {
    let count = rng.gen_range(1..=MAX_DEFECTS);
    (0..count)
        .map(|_| DefectType::ALL[rng.gen_range(0..DefectType::ALL.len())])
        .collect()
}
