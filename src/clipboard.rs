//! Clipboard access behind a trait so the app can be tested without a display

use anyhow::Result;

/// Destination for copied summaries
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard.
///
/// The handle is opened lazily on first copy, so headless sessions can still
/// fill in the form and generate a summary.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new()?);
        }
        if let Some(clipboard) = self.inner.as_mut() {
            clipboard.set_text(text)?;
        }
        Ok(())
    }
}
