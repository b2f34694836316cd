use std::env;

use serde::{Deserialize, Serialize};

/// Remote vocabulary collection location
#[derive(Default, Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StoreConfig {
    /// API root, e.g. `https://cloud.appwrite.io/v1`
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self {
            endpoint: env::var("APPWRITE_ENDPOINT")
                .unwrap_or_else(|_| "https://cloud.appwrite.io/v1".to_string()),
            project_id: env::var("APPWRITE_PROJECT_ID").unwrap_or_default(),
            database_id: env::var("APPWRITE_DATABASE_ID").unwrap_or_default(),
            collection_id: env::var("APPWRITE_COLLECTION_ID").unwrap_or_default(),
        }
    }

    pub fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint.trim_end_matches('/'),
            self.database_id,
            self.collection_id
        )
    }

    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
            && !self.project_id.is_empty()
            && !self.database_id.is_empty()
            && !self.collection_id.is_empty()
    }
}
