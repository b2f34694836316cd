use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use shobdo_types::{Language, VocabularyEntry};

use crate::error::StoreError;

/// Remote document collection holding the vocabulary
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    /// Documents whose `field` matches `term`, in store order
    async fn search(
        &self,
        field: Language,
        term: &str,
        limit: Option<usize>,
    ) -> Result<Vec<VocabularyEntry>, StoreError>;

    /// One page of the whole collection, starting after `cursor`
    async fn list_page(
        &self,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Vec<VocabularyEntry>, StoreError>;
}

/// In-process store over a fixed entry list.
///
/// Search is a case-insensitive substring match, the same superset the
/// remote full-text index gives back.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<VocabularyEntry>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            offline: AtomicBool::new(false),
        }
    }

    /// Make every call fail with a network error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn push(&self, entry: VocabularyEntry) {
        if let Ok(mut entries) = self.entries.write() {
            entries.push(entry);
        }
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Network("Network request failed".to_string()));
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<VocabularyEntry> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl VocabularyStore for MemoryStore {
    async fn search(
        &self,
        field: Language,
        term: &str,
        limit: Option<usize>,
    ) -> Result<Vec<VocabularyEntry>, StoreError> {
        self.check_online()?;

        let needle = term.to_lowercase();
        let matches = self
            .snapshot()
            .into_iter()
            .filter(|e| e.text(field).to_lowercase().contains(&needle))
            .take(limit.unwrap_or(usize::MAX))
            .collect();

        Ok(matches)
    }

    async fn list_page(
        &self,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Vec<VocabularyEntry>, StoreError> {
        self.check_online()?;

        let entries = self.snapshot();
        let start = match cursor {
            Some(id) => entries
                .iter()
                .position(|e| e.id == id)
                .map(|pos| pos + 1)
                .ok_or_else(|| StoreError::Api {
                    status: 400,
                    message: format!("Invalid cursor: {}", id),
                })?,
            None => 0,
        };

        Ok(entries.into_iter().skip(start).take(page_size).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(vec![
            VocabularyEntry::new("1", "পানি", "물"),
            VocabularyEntry::new("2", "পানীয়", "음료"),
            VocabularyEntry::new("3", "ভাত", "밥"),
        ])
    }

    #[tokio::test]
    async fn test_search_is_substring() {
        let results = store().search(Language::Korean, "료", None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "2");
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let results = store().search(Language::Bangla, "প", Some(1)).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_pages_after_cursor() {
        let store = store();
        let first = store.list_page(None, 2).await.unwrap();
        assert_eq!(first.len(), 2);
        let rest = store.list_page(Some(&first[1].id), 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].id, "3");
    }

    #[tokio::test]
    async fn test_offline_fails_with_network_error() {
        let store = store();
        store.set_offline(true);
        assert!(matches!(
            store.search(Language::Bangla, "প", None).await,
            Err(StoreError::Network(_))
        ));
    }
}
