//! Application state and key handling
//!
//! `App` is the session: it owns the form, the last generated summary and
//! everything the UI needs to draw. Nothing here is global, so a test can run
//! any number of independent sessions side by side.

use crate::clipboard::Clipboard;
use crate::error::ValidationError;
use crate::platform::COPY_MODIFIER;
use crate::state::{FieldKind, FieldSpec, FormCursor, FormState, Schema};
use crate::summary::format_summary;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Field values for the job being described
    pub form: FormState,
    /// Keyboard focus within the form
    pub cursor: FormCursor,
    /// Last generated summary; only replaced on an explicit generate
    pub summary: Option<String>,
    /// Feedback shown in the status bar until the next key press
    pub status_message: Option<String>,
    /// Pending error messages, shown one at a time in a modal dialog
    errors: VecDeque<String>,
    clipboard: Box<dyn Clipboard>,
    quit: bool,
}

impl App {
    /// Create a new session for the given schema
    pub fn new(schema: Schema, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            form: FormState::new(Arc::new(schema)),
            cursor: FormCursor::default(),
            summary: None,
            status_message: None,
            errors: VecDeque::new(),
            clipboard,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Field that currently has keyboard focus
    pub fn active_field(&self) -> Option<&FieldSpec> {
        self.form.schema().fields.get(self.cursor.field)
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog is modal
        if self.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_error();
            }
            return;
        }

        self.status_message = None;

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('g') if ctrl => self.generate(),
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('y') if key.modifiers.contains(COPY_MODIFIER) => self.copy_summary(),
            KeyCode::Tab => self.next_field(),
            KeyCode::BackTab => self.prev_field(),
            _ => self.handle_field_key(key),
        }
    }

    fn next_field(&mut self) {
        let count = self.form.schema().fields.len();
        self.cursor.next_field(count);
    }

    fn prev_field(&mut self) {
        let count = self.form.schema().fields.len();
        self.cursor.prev_field(count);
    }

    /// Keys that act on the focused field
    fn handle_field_key(&mut self, key: KeyEvent) {
        let Some(spec) = self.active_field().cloned() else {
            return;
        };

        let result = match &spec.kind {
            FieldKind::Text { multiline } => self.handle_text_key(&spec.name, *multiline, key),
            FieldKind::Choice { .. } => self.handle_choice_key(&spec.name, spec.options(), key),
        };

        if let Err(err) = result {
            self.report_validation(err);
        }
    }

    fn handle_text_key(
        &mut self,
        name: &str,
        multiline: bool,
        key: KeyEvent,
    ) -> Result<(), ValidationError> {
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.push_char(name, c)
            }
            KeyCode::Backspace => self.form.pop_char(name),
            KeyCode::Delete => self.form.clear_field(name),
            KeyCode::Enter if multiline => self.form.push_char(name, '\n'),
            KeyCode::Enter | KeyCode::Down => {
                self.next_field();
                Ok(())
            }
            KeyCode::Up => {
                self.prev_field();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_choice_key(
        &mut self,
        name: &str,
        options: &[String],
        key: KeyEvent,
    ) -> Result<(), ValidationError> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.cursor.prev_option(options.len()),
            KeyCode::Right | KeyCode::Char('l') => self.cursor.next_option(options.len()),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(option) = options.get(self.cursor.option) {
                    self.form.toggle(name, option)?;
                }
            }
            KeyCode::Delete => self.form.clear_field(name)?,
            KeyCode::Down | KeyCode::Char('j') => self.next_field(),
            KeyCode::Up | KeyCode::Char('k') => self.prev_field(),
            _ => {}
        }
        Ok(())
    }

    fn report_validation(&mut self, err: ValidationError) {
        tracing::warn!("Rejected form edit: {err}");
        self.push_error(format!("Invalid input: {err}"));
    }

    /// Render the summary from the current form and cache it
    pub fn generate(&mut self) {
        if self.has_errors() {
            tracing::debug!("Summary generation skipped while errors are pending");
            return;
        }
        let summary = format_summary(&self.form);
        tracing::info!("Generated summary ({} lines)", summary.lines().count());
        self.summary = Some(summary);
        self.status_message = Some("Summary generated".to_string());
    }

    /// Copy the cached summary to the clipboard
    pub fn copy_summary(&mut self) {
        let Some(summary) = self.summary.as_deref() else {
            self.status_message = Some("Nothing to copy, generate a summary first".to_string());
            return;
        };

        match self.clipboard.set_text(summary) {
            Ok(()) => {
                self.status_message = Some(format!("Copied {} chars", summary.chars().count()));
            }
            Err(err) => {
                tracing::warn!("Clipboard copy failed: {err:#}");
                self.push_error(format!("Could not copy to clipboard: {err}"));
            }
        }
    }

    /// Clear the form for the next job
    pub fn reset(&mut self) {
        self.form.reset();
        self.cursor = FormCursor::default();
        self.summary = None;
        self.status_message = Some("Form cleared".to_string());
        tracing::info!("Form reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MockClipboard;
    use crate::summary::DIVIDER;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn copy_key() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('y'), COPY_MODIFIER)
    }

    fn app_with(clipboard: MockClipboard) -> App {
        App::new(Schema::standard(), Box::new(clipboard))
    }

    fn app() -> App {
        app_with(MockClipboard::new())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn focus(app: &mut App, name: &str) {
        let index = app.form.schema().index_of(name).unwrap();
        while app.cursor.field != index {
            app.handle_key(key(KeyCode::Tab));
        }
    }

    fn select(app: &mut App, name: &str, option: &str) {
        focus(app, name);
        let spec = app.active_field().unwrap().clone();
        let target = spec.options().iter().position(|o| o == option).unwrap();
        while app.cursor.option != target {
            app.handle_key(key(KeyCode::Right));
        }
        app.handle_key(key(KeyCode::Char(' ')));
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_first_field() {
            let app = app();
            assert_eq!(app.active_field().unwrap().name, "check_in");
        }

        #[test]
        fn test_tab_and_backtab() {
            let mut app = app();
            app.handle_key(key(KeyCode::Tab));
            assert_eq!(app.active_field().unwrap().name, "check_out");
            app.handle_key(key(KeyCode::BackTab));
            app.handle_key(key(KeyCode::BackTab));
            assert_eq!(app.active_field().unwrap().name, "description");
        }

        #[test]
        fn test_enter_on_single_line_text_advances() {
            let mut app = app();
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.active_field().unwrap().name, "check_out");
        }

        #[test]
        fn test_option_cursor_wraps() {
            let mut app = app();
            focus(&mut app, "parking");
            app.handle_key(key(KeyCode::Left));
            assert_eq!(app.cursor.option, 2);
        }

        #[test]
        fn test_esc_quits() {
            let mut app = app();
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn test_ctrl_c_quits() {
            let mut app = app();
            app.handle_key(ctrl('c'));
            assert!(app.should_quit());
        }
    }

    mod editing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_text_field() {
            let mut app = app();
            type_text(&mut app, "8:05");
            app.handle_key(key(KeyCode::Backspace));
            type_text(&mut app, "0");
            assert_eq!(app.form.text("check_in"), "8:00");
        }

        #[test]
        fn test_enter_in_description_adds_newline() {
            let mut app = app();
            focus(&mut app, "description");
            type_text(&mut app, "line one");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "line two");
            assert_eq!(app.form.text("description"), "line one\nline two");
        }

        #[test]
        fn test_space_toggles_option() {
            let mut app = app();
            select(&mut app, "equipment", "Cimex");
            assert_eq!(app.form.selection("equipment"), ["Cimex"]);
            app.handle_key(key(KeyCode::Char(' ')));
            assert!(app.form.selection("equipment").is_empty());
        }

        #[test]
        fn test_delete_clears_field() {
            let mut app = app();
            type_text(&mut app, "8:00");
            app.handle_key(key(KeyCode::Delete));
            assert_eq!(app.form.text("check_in"), "");

            select(&mut app, "payment", "Visa");
            select(&mut app, "payment", "Debit");
            app.handle_key(key(KeyCode::Delete));
            assert!(app.form.selection("payment").is_empty());
        }

        #[test]
        fn test_single_choice_replaces() {
            let mut app = app();
            select(&mut app, "setup", "Easy");
            select(&mut app, "setup", "Difficult");
            assert_eq!(app.form.selection("setup"), ["Difficult"]);
        }

        #[test]
        fn test_reset_clears_everything() {
            let mut app = app();
            type_text(&mut app, "8:00");
            select(&mut app, "payment", "Visa");
            app.handle_key(ctrl('g'));
            app.handle_key(ctrl('r'));
            assert!(app.summary.is_none());
            assert!(app.form.fields().all(|(_, value)| value.is_empty()));
            assert_eq!(app.cursor, FormCursor::default());
        }
    }

    mod generate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_no_summary_until_generated() {
            let mut app = app();
            type_text(&mut app, "8:00");
            assert!(app.summary.is_none());
        }

        #[test]
        fn test_generate_reference_job() {
            let mut app = app();
            type_text(&mut app, "8:00");
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "10:30");
            select(&mut app, "payment", "Cash");
            select(&mut app, "payment", "Visa");
            select(&mut app, "equipment", "Cimex");
            focus(&mut app, "description");
            type_text(&mut app, " fixed the leak ");
            app.handle_key(ctrl('g'));

            let expected = format!(
                "JOB TIME\nCheck-in: 8:00\nCheck-out: 10:30\n{DIVIDER}\n\
                 PAYMENT INFORMATION\nVisa and Cash.\n{DIVIDER}\n\
                 EQUIPMENT USED\nCimex.\n{DIVIDER}\n\
                 JOB DESCRIPTION\nFixed the leak.\n{DIVIDER}\n"
            );
            assert_eq!(app.summary.as_deref(), Some(expected.as_str()));
            assert_eq!(app.status_message.as_deref(), Some("Summary generated"));
        }

        #[test]
        fn test_summary_is_cached_until_regenerated() {
            let mut app = app();
            app.handle_key(ctrl('g'));
            let first = app.summary.clone();
            type_text(&mut app, "9:00");
            assert_eq!(app.summary, first);
            app.handle_key(ctrl('g'));
            assert!(app.summary.unwrap().contains("Check-in: 9:00"));
        }

        #[test]
        fn test_generate_blocked_by_pending_error() {
            let mut app = app();
            app.push_error("Invalid input: boom");
            app.generate();
            assert!(app.summary.is_none());
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_error_dialog_is_modal() {
            let mut app = app();
            app.push_error("first");
            app.push_error("second");
            app.handle_key(key(KeyCode::Char('x')));
            assert_eq!(app.form.text("check_in"), "");
            assert_eq!(app.current_error(), Some("first"));
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.current_error(), Some("second"));
            app.handle_key(key(KeyCode::Esc));
            assert!(!app.has_errors());
            assert!(!app.should_quit());
        }

        #[test]
        fn test_validation_error_is_reported() {
            let mut app = app();
            app.report_validation(ValidationError::UnknownOption {
                field: "payment".into(),
                option: "Bitcoin".into(),
            });
            assert_eq!(
                app.current_error(),
                Some("Invalid input: 'Bitcoin' is not a valid option for payment")
            );
        }
    }

    mod copy {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_copy_without_summary() {
            let mut clipboard = MockClipboard::new();
            clipboard.expect_set_text().never();
            let mut app = app_with(clipboard);
            app.handle_key(copy_key());
            assert_eq!(
                app.status_message.as_deref(),
                Some("Nothing to copy, generate a summary first")
            );
        }

        #[test]
        fn test_copy_sends_summary() {
            let mut clipboard = MockClipboard::new();
            clipboard
                .expect_set_text()
                .withf(|text| text.to_string() == format!("JOB TIME\n{DIVIDER}\n"))
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(clipboard);
            app.handle_key(ctrl('g'));
            app.handle_key(copy_key());
            assert_eq!(app.status_message.as_deref(), Some("Copied 39 chars"));
        }

        #[test]
        fn test_copy_failure_shows_error() {
            let mut clipboard = MockClipboard::new();
            clipboard
                .expect_set_text()
                .times(1)
                .returning(|_| Err(anyhow::anyhow!("no display")));
            let mut app = app_with(clipboard);
            app.generate();
            app.copy_summary();
            assert_eq!(
                app.current_error(),
                Some("Could not copy to clipboard: no display")
            );
        }
    }
}
