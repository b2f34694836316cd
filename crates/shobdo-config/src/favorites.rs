use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    PathBuf::from(".shobdo")
}

fn default_key() -> String {
    "favorites".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Directory holding persisted snapshots
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Well-known key the favorites snapshot is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

impl FavoritesConfig {
    pub fn new() -> Self {
        let data_dir = env::var("SHOBDO_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        Self {
            data_dir,
            key: default_key(),
        }
    }
}
