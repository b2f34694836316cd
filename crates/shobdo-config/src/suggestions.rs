use std::env;

use serde::{Deserialize, Serialize};

fn default_limit() -> usize {
    7
}

fn default_debounce_ms() -> u64 {
    300
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Upper bound on documents fetched per keystroke
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Quiet window before a suggestion fetch fires
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SuggestionConfig {
    pub fn new() -> Self {
        let debounce_ms = env::var("SUGGESTION_DEBOUNCE_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_debounce_ms);

        Self {
            limit: default_limit(),
            debounce_ms,
        }
    }
}
