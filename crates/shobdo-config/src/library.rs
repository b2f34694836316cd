use serde::{Deserialize, Serialize};

fn default_page_size() -> usize {
    25
}

fn default_end_reached_threshold() -> f32 {
    0.1
}

fn default_search_debounce_ms() -> u64 {
    300
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct LibraryConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Fraction of the rendered list left before the next page is requested
    #[serde(default = "default_end_reached_threshold")]
    pub end_reached_threshold: f32,
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            end_reached_threshold: default_end_reached_threshold(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

impl LibraryConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
