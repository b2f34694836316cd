use std::sync::Arc;

use shobdo_translator::{TranslateError, Translator};
use shobdo_types::{Language, SearchResult};

use crate::error::SearchError;
use crate::language::{Direction, detect_direction};
use crate::store::VocabularyStore;

/// Full-query lookup: store matches first, machine translation only when the
/// store has nothing.
pub struct SearchResolver {
    store: Arc<dyn VocabularyStore>,
    translator: Option<Arc<dyn Translator>>,
}

impl SearchResolver {
    pub fn new(store: Arc<dyn VocabularyStore>, translator: Option<Arc<dyn Translator>>) -> Self {
        Self { store, translator }
    }

    pub async fn resolve(
        &self,
        query: &str,
        selection: Language,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::UnsupportedLanguage);
        }

        let documents = self.store.search(selection, query, None).await?;
        if !documents.is_empty() {
            tracing::debug!("Store matched {} documents for '{}'", documents.len(), query);
            return Ok(documents.into_iter().map(SearchResult::from).collect());
        }

        let direction = detect_direction(query).ok_or(SearchError::UnsupportedLanguage)?;
        tracing::info!(
            "No store match for '{}', translating {} -> {}",
            query,
            direction.source.code(),
            direction.target.code()
        );

        let translated = self.translate(query, direction).await?;
        Ok(vec![pair(query, &translated, direction)])
    }

    async fn translate(&self, query: &str, direction: Direction) -> Result<String, SearchError> {
        let translator = self
            .translator
            .as_ref()
            .ok_or_else(|| SearchError::Translation("Translation is not available".to_string()))?;

        let translation = translator
            .translate(
                query,
                direction.source.code().to_string(),
                direction.target.code().to_string(),
            )
            .await
            .map_err(|e| {
                tracing::warn!("Fallback translation failed: {}", e);
                match e {
                    TranslateError::NetworkError(message) => SearchError::Network(message),
                    TranslateError::UnsupportedLanguagePair { .. } => {
                        SearchError::UnsupportedLanguage
                    }
                    TranslateError::ApiError(message) => SearchError::Translation(message),
                    other => SearchError::Translation(other.to_string()),
                }
            })?;

        Ok(translation.text)
    }
}

/// Put the raw query and its translation into the right fields
fn pair(query: &str, translated: &str, direction: Direction) -> SearchResult {
    match direction.source {
        Language::Bangla => SearchResult::new(query, translated),
        Language::Korean => SearchResult::new(translated, query),
    }
}
