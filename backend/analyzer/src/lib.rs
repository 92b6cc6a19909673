//! `defectscan-analyzer` — turns a defect type into a structured explanation.
//!
//! Provides:
//! - Provider adapters (Gemini, OpenAI-compatible, offline catalog)
//! - A name-keyed provider registry
//! - The ordered fallback orchestrator
//! - The defect assembler that builds a full `AnalysisResult`

pub mod assembler;
pub mod fallback;
pub mod providers;

pub use assembler::{draw_defect_types, DefectAssembler};
pub use fallback::FallbackAnalyzer;
pub use providers::{ProviderConfig, ProviderRegistry};
