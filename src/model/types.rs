//! Normalized result entities.

use serde::{Deserialize, Serialize};

/// Maximum results kept for display; digit hotkeys 1-9 map onto these.
pub const DISPLAY_LIMIT: usize = 9;

/// One ranked hit from the backend, normalized for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// 1-based position in the current result set.
    pub index: usize,
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchResult {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(untitled)"
        } else {
            &self.title
        }
    }
}
