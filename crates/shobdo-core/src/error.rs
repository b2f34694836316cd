/// Failure talking to the remote vocabulary store
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Store returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed store response: {0}")]
    Decode(String),
}

/// Categorized failure of an explicit, user-initiated search
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Unsupported language. Please input text in Bangla or Korean.")]
    UnsupportedLanguage,

    #[error("{0}")]
    Translation(String),

    #[error("{0}")]
    Store(String),
}

/// Title and body of the alert shown for a failed search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl SearchError {
    pub fn notice(&self) -> Notice {
        let (title, message) = match self {
            SearchError::Network(_) => (
                "No Internet Connection",
                "Please check your internet connection and try again.".to_string(),
            ),
            SearchError::UnsupportedLanguage => ("Invalid Language", self.to_string()),
            SearchError::Translation(message) => ("Translation Error", message.clone()),
            SearchError::Store(message) => ("Error", message.clone()),
        };

        Notice {
            title: title.to_string(),
            message,
        }
    }
}

impl From<StoreError> for SearchError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Network(message) => SearchError::Network(message),
            other => SearchError::Store(other.to_string()),
        }
    }
}

/// Local snapshot read/write failure. Logged, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to read snapshot: {0}")]
    Read(String),

    #[error("Failed to write snapshot: {0}")]
    Write(String),

    #[error("Corrupt snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_notice() {
        let notice = SearchError::from(StoreError::Network("timeout".into())).notice();
        assert_eq!(notice.title, "No Internet Connection");
    }

    #[test]
    fn test_api_failure_is_not_network() {
        let error = SearchError::from(StoreError::Api {
            status: 401,
            message: "unauthorized".into(),
        });
        assert!(matches!(error, SearchError::Store(_)));
        assert_eq!(error.notice().title, "Error");
    }

    #[test]
    fn test_translation_notice_keeps_message() {
        let notice = SearchError::Translation("quota exceeded".into()).notice();
        assert_eq!(notice.title, "Translation Error");
        assert_eq!(notice.message, "quota exceeded");
    }
}
