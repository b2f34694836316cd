use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Fall back to machine translation when the store has no match
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Deployed translation script URL
    #[serde(default)]
    pub url: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            url: String::new(),
        }
    }
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let url = env::var("TRANSLATE_URL").unwrap_or_default();
        Self {
            enabled: !url.is_empty(),
            url,
        }
    }
}
