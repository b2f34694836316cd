use std::sync::Mutex;

use arboard::Clipboard;
use shobdo_core::capabilities::{CapabilityError, ClipboardAccess};

/// System clipboard
pub struct ArboardClipboard {
    clipboard: Mutex<Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self, CapabilityError> {
        let clipboard =
            Clipboard::new().map_err(|e| CapabilityError::Unavailable(e.to_string()))?;

        Ok(Self {
            clipboard: Mutex::new(clipboard),
        })
    }
}

impl ClipboardAccess for ArboardClipboard {
    fn get_text(&self) -> Result<String, CapabilityError> {
        let mut clipboard = self
            .clipboard
            .lock()
            .map_err(|_| CapabilityError::Failed("clipboard lock poisoned".to_string()))?;

        clipboard
            .get_text()
            .map_err(|e| CapabilityError::Failed(e.to_string()))
    }

    fn set_text(&self, text: &str) -> Result<(), CapabilityError> {
        let mut clipboard = self
            .clipboard
            .lock()
            .map_err(|_| CapabilityError::Failed("clipboard lock poisoned".to_string()))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| CapabilityError::Failed(e.to_string()))?;
        tracing::debug!("Copied {} chars to clipboard", text.chars().count());
        Ok(())
    }
}
