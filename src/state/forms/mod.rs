//! Form domain layer
//!
//! Schema-validated form state for a job summary session, plus the keyboard
//! cursor the UI moves across it.

mod cursor;
mod field;
mod form_state;

pub use cursor::FormCursor;
pub use field::FieldValue;
pub use form_state::FormState;
