//! Section extraction from free-form provider text.
//!
//! Labels are scanned in canonical order. Each section ends at the nearest
//! later label found after its own start, or at end of text. Output that
//! puts labels out of order is not reordered; sections come out truncated or
//! merged, and callers must not rely on anything better.

use crate::schema::Section;
use crate::types::AnalysisSections;

const BOLD_MARKER: &str = "**";

/// Parse raw provider output into structured sections.
///
/// Accepts `&str` or `Option<&str>`; empty or missing input yields
/// [`AnalysisSections::unavailable`].
pub fn parse_sections<'a>(raw: impl Into<Option<&'a str>>) -> AnalysisSections {
    let mut sections = AnalysisSections::unavailable();
    let text = match raw.into() {
        Some(text) if !text.is_empty() => text,
        _ => return sections,
    };

    for (i, section) in Section::ALL.iter().enumerate() {
        let label = section.label();
        let Some(start) = text.find(label) else {
            continue;
        };

        let end = Section::ALL[i + 1..]
            .iter()
            .filter_map(|next| text[start..].find(next.label()).map(|off| start + off))
            .min()
            .unwrap_or(text.len());

        let body = &text[start + label.len()..end];
        let value = body.replace(BOLD_MARKER, "");
        let value = value.trim();
        if !value.is_empty() {
            sections.set(*section, value.to_string());
        }
    }

    sections
}
