use std::fmt::Write;

use crate::schema::Section;

/// Build the instruction sent to a provider for one defect type.
///
/// The output asks for every [`Section`] in canonical order, each introduced by
/// its exact label, so the response can be split by [`crate::parse_sections`].
pub fn build_prompt(defect_type: &str) -> String {
    let mut prompt = String::from(
        "You are an expert in industrial quality inspection and materials engineering.\n",
    );
    let _ = writeln!(
        prompt,
        "An inspection image shows the following defect: {defect_type}.\n"
    );
    prompt.push_str(
        "Explain this defect using exactly four sections in the order below. \
         Start each section on a new line with its uppercase label followed by a colon.\n\n",
    );
    for section in Section::ALL {
        let _ = writeln!(prompt, "{} {}", section.label(), section.instruction());
    }
    prompt.push_str("\nKeep each section concise. Do not add any other sections.");
    prompt
}
