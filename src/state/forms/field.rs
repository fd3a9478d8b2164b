//! Form field value objects

use crate::state::schema::{FieldKind, FieldSpec};

/// Current value of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Selected options, always in the group's declared order
    Choice(Vec<String>),
}

impl FieldValue {
    /// Empty value matching a field declaration
    pub fn empty_for(spec: &FieldSpec) -> Self {
        match spec.kind {
            FieldKind::Text { .. } => FieldValue::Text(String::new()),
            FieldKind::Choice { .. } => FieldValue::Choice(Vec::new()),
        }
    }

    /// Get the text value (returns empty string for choice groups)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Choice(_) => "",
        }
    }

    /// Get the selection (returns empty slice for text fields)
    pub fn as_selection(&self) -> &[String] {
        match self {
            FieldValue::Choice(selected) => selected,
            FieldValue::Text(_) => &[],
        }
    }

    /// True when the field holds no text or no selection
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Choice(selected) => selected.is_empty(),
        }
    }
}
