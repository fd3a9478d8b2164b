//! Application state module

mod forms;
pub mod schema;

pub use forms::*;
pub use schema::{FieldKind, FieldSpec, LineSpec, Schema, SectionSpec, SelectMode};
