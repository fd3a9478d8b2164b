//! Error types for the job summary domain.
//!
//! Two families of failure exist:
//! - [`ValidationError`]: a form edit that does not fit the schema
//! - [`SchemaError`]: a schema table (usually from user configuration) that is
//!   internally inconsistent
//!
//! Terminal, clipboard and config IO failures are plumbing and travel as
//! `anyhow::Error` instead.

use thiserror::Error;

/// Rejected edit to a [`FormState`](crate::state::FormState).
///
/// A failed edit never mutates the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field name is not part of the schema.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// The option is not declared for the choice group.
    #[error("'{option}' is not a valid option for {field}")]
    UnknownOption { field: String, option: String },

    /// A single-select group was given more than one value.
    #[error("{field} accepts a single selection, got {count}")]
    TooManySelections { field: String, count: usize },

    /// Text supplied for a choice group, or a selection for a text field.
    #[error("value kind does not match field '{0}'")]
    KindMismatch(String),
}

/// Inconsistent schema table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),

    #[error("choice group '{0}' declares no options")]
    EmptyGroup(String),

    #[error("choice group '{field}' declares '{option}' more than once")]
    DuplicateOption { field: String, option: String },

    /// A summary section line points at a field the schema does not declare.
    #[error("section '{section}' references unknown field '{field}'")]
    UnknownSectionField { section: String, field: String },

    /// Description normalization only applies to free text.
    #[error("section '{section}' normalizes non-text field '{field}'")]
    NormalizedChoice { section: String, field: String },
}
