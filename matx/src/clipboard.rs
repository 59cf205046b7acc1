//! Clipboard seam
//!
//! Matrix encodings are handed to whatever clipboard the host provides.
//! The CLI plugs in the system clipboard; tests use [`MemoryClipboard`].

use std::cell::RefCell;
use std::rc::Rc;

/// Destination for generated encodings.
///
/// Returns `Ok(())` on success, or an error message on failure.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// In-process clipboard that keeps the last text written.
///
/// Clones share one buffer, so a handle kept outside a session sees what
/// the session copied.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
    fail_with: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard whose writes always fail with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            contents: Rc::default(),
            fail_with: Some(message.into()),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        if let Some(message) = &self.fail_with {
            return Err(message.clone());
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}
