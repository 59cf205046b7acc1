//! System clipboard for copying matrix encodings.

use matx::Clipboard;

pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Open the system clipboard.
    ///
    /// Returns an error message when no clipboard is reachable (headless
    /// sessions, missing display server).
    pub fn open() -> Result<Self, String> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| format!("Failed to access clipboard: {}", e))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| format!("Failed to copy to clipboard: {}", e))
    }
}
