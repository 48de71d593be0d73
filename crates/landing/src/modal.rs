//! "Open account" modal and its overlay

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Modal {
    open: bool,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
        debug!("Modal opened");
    }

    pub fn close(&mut self) {
        self.open = false;
        debug!("Modal closed");
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The overlay is shown and hidden together with the modal
    pub fn overlay_visible(&self) -> bool {
        self.open
    }

    /// Escape closes an open modal. Returns true when it did.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.open {
            self.close();
            return true;
        }
        false
    }
}
