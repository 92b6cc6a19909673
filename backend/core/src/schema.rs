//! Labeled-section protocol and defect catalog.
//!
//! The prompt builder asks for sections by these labels and the parser splits
//! provider output on the same labels, so both read from this one table.

/// Placeholder location attached to every defect. No spatial detection is done.
pub const DEFECT_LOCATION: &str = "Detected region";

/// Sentinel for text sections that could not be extracted.
pub const SECTION_UNAVAILABLE: &str = "Analysis not available";

/// Sentinel for an unextracted severity.
pub const SEVERITY_UNKNOWN: &str = "Unknown";

/// One of the four labeled sections, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Cause,
    Prevention,
    Solution,
    Severity,
}

impl Section {
    /// Canonical order. The parser scans labels in exactly this order.
    pub const ALL: [Section; 4] = [
        Section::Cause,
        Section::Prevention,
        Section::Solution,
        Section::Severity,
    ];

    /// Exact marker expected in provider output.
    pub fn label(self) -> &'static str {
        match self {
            Section::Cause => "CAUSE:",
            Section::Prevention => "PREVENTION:",
            Section::Solution => "SOLUTION:",
            Section::Severity => "SEVERITY:",
        }
    }

    pub fn sentinel(self) -> &'static str {
        match self {
            Section::Severity => SEVERITY_UNKNOWN,
            _ => SECTION_UNAVAILABLE,
        }
    }

    /// What the prompt asks the provider to write under this label.
    pub fn instruction(self) -> &'static str {
        match self {
            Section::Cause => "the most likely root causes of this defect",
            Section::Prevention => "practical measures that prevent it from recurring",
            Section::Solution => "step-by-step repair or remediation",
            Section::Severity => "exactly one word: Low, Medium, or High",
        }
    }
}

/// Fixed catalog of defect types an analysis can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectType {
    SurfaceCrack,
    Corrosion,
    PaintPeeling,
    StructuralDeformation,
}

/// Reference notes for a catalog entry, used by the offline provider.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceNotes {
    pub cause: &'static str,
    pub prevention: &'static str,
    pub solution: &'static str,
    pub severity: &'static str,
}

impl ReferenceNotes {
    pub fn get(&self, section: Section) -> &'static str {
        match section {
            Section::Cause => self.cause,
            Section::Prevention => self.prevention,
            Section::Solution => self.solution,
            Section::Severity => self.severity,
        }
    }
}

impl DefectType {
    pub const ALL: [DefectType; 4] = [
        DefectType::SurfaceCrack,
        DefectType::Corrosion,
        DefectType::PaintPeeling,
        DefectType::StructuralDeformation,
    ];

    /// Human-readable name, as sent to providers and returned to callers.
    pub fn label(self) -> &'static str {
        match self {
            DefectType::SurfaceCrack => "Surface Crack",
            DefectType::Corrosion => "Corrosion",
            DefectType::PaintPeeling => "Paint Peeling",
            DefectType::StructuralDeformation => "Structural Deformation",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }

    pub fn reference_notes(self) -> ReferenceNotes {
        match self {
            DefectType::SurfaceCrack => ReferenceNotes {
                cause: "Thermal stress or mechanical impact",
                prevention: "Regular maintenance and avoiding sudden temperature changes",
                solution: "Apply epoxy resin to seal the crack. Clean the area thoroughly before application.",
                severity: "Medium",
            },
            DefectType::Corrosion => ReferenceNotes {
                cause: "Exposure to moisture and oxygen",
                prevention: "Regular cleaning and application of protective coatings",
                solution: "Remove rust with sandpaper, apply rust converter, and coat with protective paint",
                severity: "High",
            },
            DefectType::PaintPeeling => ReferenceNotes {
                cause: "Poor surface preparation or environmental exposure",
                prevention: "Use high-quality paint and proper surface preparation",
                solution: "Remove loose paint, sand the surface, and apply new primer and paint",
                severity: "Low",
            },
            DefectType::StructuralDeformation => ReferenceNotes {
                cause: "Excessive load or impact",
                prevention: "Regular inspection and load monitoring",
                solution: "Consult with structural engineer for proper reinforcement",
                severity: "High",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_severity_uses_unknown() {
        assert_eq!(Section::Severity.sentinel(), "Unknown");
        assert_eq!(Section::Cause.sentinel(), "Analysis not available");
        assert_eq!(Section::Prevention.sentinel(), "Analysis not available");
        assert_eq!(Section::Solution.sentinel(), "Analysis not available");
    }

    #[test]
    fn defect_type_label_lookup() {
        assert_eq!(
            DefectType::from_label("paint peeling"),
            Some(DefectType::PaintPeeling)
        );
        assert_eq!(DefectType::from_label("Dent"), None);
    }
}
