use serde::{Deserialize, Serialize};

use crate::schema::{Section, DEFECT_LOCATION};

/// Structured explanation extracted from one provider response.
///
/// Every field is always populated; anything the provider did not supply
/// holds its section sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSections {
    pub cause: String,
    pub prevention: String,
    pub solution: String,
    pub severity: String,
}

impl AnalysisSections {
    /// The fully degraded record returned when no provider answered.
    pub fn unavailable() -> Self {
        Self {
            cause: Section::Cause.sentinel().to_string(),
            prevention: Section::Prevention.sentinel().to_string(),
            solution: Section::Solution.sentinel().to_string(),
            severity: Section::Severity.sentinel().to_string(),
        }
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Cause => &self.cause,
            Section::Prevention => &self.prevention,
            Section::Solution => &self.solution,
            Section::Severity => &self.severity,
        }
    }

    pub(crate) fn set(&mut self, section: Section, value: String) {
        let slot = match section {
            Section::Cause => &mut self.cause,
            Section::Prevention => &mut self.prevention,
            Section::Solution => &mut self.solution,
            Section::Severity => &mut self.severity,
        };
        *slot = value;
    }

    /// True when no section was extracted.
    pub fn is_unavailable(&self) -> bool {
        Section::ALL
            .into_iter()
            .all(|s| self.get(s) == s.sentinel())
    }
}

impl Default for AnalysisSections {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// One structured finding returned to the caller.
///
/// Field order and names are part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    #[serde(rename = "type")]
    pub defect_type: String,
    pub location: String,
    pub severity: String,
    pub cause: String,
    pub prevention: String,
    pub solution: String,
}

impl DefectRecord {
    pub fn new(defect_type: impl Into<String>, sections: AnalysisSections) -> Self {
        let AnalysisSections {
            cause,
            prevention,
            solution,
            severity,
        } = sections;
        Self {
            defect_type: defect_type.into(),
            location: DEFECT_LOCATION.to_string(),
            severity,
            cause,
            prevention,
            solution,
        }
    }
}

/// Response for one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub success: bool,
    /// Opaque handle from upload storage; never interpreted here.
    pub file_path: String,
    pub defects: Vec<DefectRecord>,
}
