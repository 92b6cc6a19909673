pub mod error;
pub mod prompt;
pub mod schema;
pub mod sections;
pub mod traits;
pub mod types;

pub use error::ScanError;
pub use prompt::build_prompt;
pub use schema::{DefectType, Section, DEFECT_LOCATION};
pub use sections::parse_sections;
pub use traits::{ProviderOutcome, TextProvider};
pub use types::{AnalysisResult, AnalysisSections, DefectRecord};
