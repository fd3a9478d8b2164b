//! Summary generation
//!
//! Renders a [`FormState`] snapshot into the sectioned plain-text summary that
//! gets copied into job records. Sections come from the schema's section
//! table, so the output layout and the form can only change together.
//!
//! Formatting is total: every valid form produces a summary, and the form
//! itself guarantees selections are valid and already in declared order.

use crate::state::{FieldValue, FormState, LineSpec, SectionSpec};

/// Line written after every emitted section
pub const DIVIDER: &str = "-----------------------------";

/// Join selected options into a sentence.
///
/// `[]` gives `""`, `[A]` gives `"A."`, `[A, B]` gives `"A and B."` and longer
/// lists give `"A, B and C."`.
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => format!("{}.", only.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|item| item.as_ref()).collect();
            format!("{} and {}.", head.join(", "), last.as_ref())
        }
    }
}

/// Trim, capitalize the first character and make sure the text ends in a
/// period. Returns `None` when nothing is left after trimming.
pub fn normalize_description(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    let mut normalized: String = first.to_uppercase().collect();
    normalized.push_str(chars.as_str());
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    Some(normalized)
}

/// Render the full summary for a form snapshot
pub fn format_summary(state: &FormState) -> String {
    let mut summary = String::new();
    for section in &state.schema().sections {
        write_section(&mut summary, state, section);
    }
    summary
}

fn write_section(out: &mut String, state: &FormState, section: &SectionSpec) {
    let lines: Vec<String> = section
        .lines
        .iter()
        .filter_map(|line| render_line(state, line))
        .collect();

    if lines.is_empty() && !section.always {
        return;
    }

    out.push_str(&section.header);
    out.push('\n');
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(DIVIDER);
    out.push('\n');
}

fn render_line(state: &FormState, line: &LineSpec) -> Option<String> {
    match line {
        LineSpec::Value { field, label } => {
            let value = state.get(field).ok()?;
            if value.is_empty() {
                return None;
            }
            let value = match value {
                FieldValue::Text(text) => text.clone(),
                FieldValue::Choice(selection) => format_list(selection),
            };
            Some(match label {
                Some(label) => format!("{label}: {value}"),
                None => value,
            })
        }
        LineSpec::Normalized { field } => normalize_description(state.text(field)),
    }
}
