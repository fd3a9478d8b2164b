//! Form state for one job summary session

use super::field::FieldValue;
use crate::error::ValidationError;
use crate::state::schema::{FieldKind, FieldSpec, Schema, SelectMode};
use std::sync::Arc;

/// Current value of every schema field, in schema order.
///
/// Every mutation is validated against the schema; a rejected edit leaves the
/// state exactly as it was. Choice selections are stored in declared option
/// order regardless of the order they were picked in.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: Arc<Schema>,
    values: Vec<FieldValue>,
}

impl FormState {
    /// Create an empty form for the given schema
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = schema.fields.iter().map(FieldValue::empty_for).collect();
        Self { schema, values }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Fields paired with their current values, in schema order
    pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &FieldValue)> {
        self.schema.fields.iter().zip(self.values.iter())
    }

    fn locate(&self, name: &str) -> Result<(usize, &FieldSpec), ValidationError> {
        self.schema
            .index_of(name)
            .map(|index| (index, &self.schema.fields[index]))
            .ok_or_else(|| ValidationError::UnknownField(name.to_string()))
    }

    /// Current value of a field
    pub fn get(&self, name: &str) -> Result<&FieldValue, ValidationError> {
        let (index, _) = self.locate(name)?;
        Ok(&self.values[index])
    }

    /// Replace a field's value.
    ///
    /// Selections are deduplicated and reordered to the declared option
    /// order. Unknown options, more than one value for a single-select group
    /// and kind mismatches are rejected.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), ValidationError> {
        let (index, spec) = self.locate(name)?;
        let value = match (&spec.kind, value) {
            (FieldKind::Text { .. }, FieldValue::Text(text)) => FieldValue::Text(text),
            (FieldKind::Choice { mode, options }, FieldValue::Choice(selection)) => {
                FieldValue::Choice(canonicalize(&spec.name, *mode, options, &selection)?)
            }
            _ => return Err(ValidationError::KindMismatch(name.to_string())),
        };
        self.values[index] = value;
        Ok(())
    }

    /// Text of a free text field ("" for unknown or choice fields)
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// Selection of a choice group (empty for unknown or text fields)
    pub fn selection(&self, name: &str) -> &[String] {
        self.get(name).map(FieldValue::as_selection).unwrap_or(&[])
    }

    pub fn is_selected(&self, name: &str, option: &str) -> bool {
        self.selection(name).iter().any(|s| s == option)
    }

    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Result<(), ValidationError> {
        self.set(name, FieldValue::Text(text.into()))
    }

    /// Flip one option of a choice group.
    ///
    /// Multi-select groups add or remove the option. Single-select groups
    /// select it, replacing any previous choice, or clear it when it was
    /// already the selected one.
    pub fn toggle(&mut self, name: &str, option: &str) -> Result<(), ValidationError> {
        let (_, spec) = self.locate(name)?;
        let mode = match &spec.kind {
            FieldKind::Choice { mode, .. } => *mode,
            FieldKind::Text { .. } => return Err(ValidationError::KindMismatch(name.to_string())),
        };

        let current = self.selection(name);
        let next: Vec<String> = if self.is_selected(name, option) {
            current.iter().filter(|s| *s != option).cloned().collect()
        } else {
            match mode {
                SelectMode::Single => vec![option.to_string()],
                SelectMode::Multi => {
                    let mut next = current.to_vec();
                    next.push(option.to_string());
                    next
                }
            }
        };
        self.set(name, FieldValue::Choice(next))
    }

    /// Append a typed character to a text field
    pub fn push_char(&mut self, name: &str, c: char) -> Result<(), ValidationError> {
        let mut text = self.text_field(name)?.to_string();
        text.push(c);
        self.set_text(name, text)
    }

    /// Remove the last character of a text field
    pub fn pop_char(&mut self, name: &str) -> Result<(), ValidationError> {
        let mut text = self.text_field(name)?.to_string();
        text.pop();
        self.set_text(name, text)
    }

    fn text_field(&self, name: &str) -> Result<&str, ValidationError> {
        match self.get(name)? {
            FieldValue::Text(text) => Ok(text),
            FieldValue::Choice(_) => Err(ValidationError::KindMismatch(name.to_string())),
        }
    }

    /// Empty a single field
    pub fn clear_field(&mut self, name: &str) -> Result<(), ValidationError> {
        let (index, spec) = self.locate(name)?;
        let empty = FieldValue::empty_for(spec);
        self.values[index] = empty;
        Ok(())
    }

    /// Empty every field, ready for the next job
    pub fn reset(&mut self) {
        self.values = self
            .schema
            .fields
            .iter()
            .map(FieldValue::empty_for)
            .collect();
    }
}

/// Validate a selection and return it in declared option order, deduplicated
fn canonicalize(
    field: &str,
    mode: SelectMode,
    options: &[String],
    selection: &[String],
) -> Result<Vec<String>, ValidationError> {
    if let Some(unknown) = selection.iter().find(|s| !options.contains(s)) {
        return Err(ValidationError::UnknownOption {
            field: field.to_string(),
            option: unknown.clone(),
        });
    }

    let ordered: Vec<String> = options
        .iter()
        .filter(|o| selection.contains(o))
        .cloned()
        .collect();

    if mode == SelectMode::Single && ordered.len() > 1 {
        return Err(ValidationError::TooManySelections {
            field: field.to_string(),
            count: ordered.len(),
        });
    }

    Ok(ordered)
}
