//! Server state.

use crate::config::SignboardConfig;
use crate::render::FontBook;

/// Application state shared across handlers.
pub struct AppState {
    pub config: SignboardConfig,
    pub fonts: FontBook,
}

impl AppState {
    pub fn new(config: SignboardConfig, fonts: FontBook) -> Self {
        Self { config, fonts }
    }
}
