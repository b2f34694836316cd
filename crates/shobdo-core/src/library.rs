use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shobdo_config::library::LibraryConfig;
use shobdo_types::VocabularyEntry;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::store::VocabularyStore;

/// One fetched page and the cursor to continue from
#[derive(Debug, Clone)]
pub struct PageLoad {
    pub entries: Vec<VocabularyEntry>,
    pub next_cursor: Option<String>,
}

/// Result of asking the index to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page merged; number of entries that survived deduplication
    Loaded(usize),
    /// Another fetch is still outstanding
    Busy,
    /// The store has no further pages
    Exhausted,
    /// Fetch failed and was logged
    Failed,
}

#[derive(Default)]
struct Mirror {
    entries: Vec<VocabularyEntry>,
    /// Every bangla and korean value already in `entries`
    seen: HashSet<String>,
    cursor: Option<String>,
    exhausted: bool,
}

impl Mirror {
    /// First-seen wins: an entry is dropped when either of its values is
    /// already present in the mirror, in either field.
    fn merge(&mut self, page: Vec<VocabularyEntry>) -> usize {
        let mut added = 0;
        for entry in page {
            if self.seen.contains(&entry.bangla) || self.seen.contains(&entry.korean) {
                tracing::trace!("Dropping duplicate {} / {}", entry.bangla, entry.korean);
                continue;
            }
            self.seen.insert(entry.bangla.clone());
            self.seen.insert(entry.korean.clone());
            self.entries.push(entry);
            added += 1;
        }
        added
    }
}

/// Resets the in-flight latch however the fetch ends
struct FetchGuard<'a>(&'a AtomicBool);

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Deduplicated local mirror of the whole vocabulary, filled page by page
pub struct LibraryIndex {
    store: Arc<dyn VocabularyStore>,
    page_size: usize,
    mirror: RwLock<Mirror>,
    fetching: AtomicBool,
}

impl LibraryIndex {
    pub fn new(store: Arc<dyn VocabularyStore>, config: &LibraryConfig) -> Self {
        Self {
            store,
            page_size: config.page_size.max(1),
            mirror: RwLock::new(Mirror::default()),
            fetching: AtomicBool::new(false),
        }
    }

    /// Fetch one raw page after `cursor`, without touching the mirror
    pub async fn load_page(&self, cursor: Option<&str>) -> Result<PageLoad, StoreError> {
        let entries = self.store.list_page(cursor, self.page_size).await?;
        let next_cursor = entries.last().map(|e| e.id.clone());
        Ok(PageLoad {
            entries,
            next_cursor,
        })
    }

    /// Discard the mirror and load the first page again
    pub async fn refresh(&self) -> LoadOutcome {
        let Some(_guard) = self.begin_fetch() else {
            return LoadOutcome::Busy;
        };

        match self.load_page(None).await {
            Ok(page) => {
                let mut mirror = self.mirror.write().await;
                *mirror = Mirror::default();
                let added = self.apply(&mut mirror, page);
                tracing::info!("Library loaded with {} entries", added);
                LoadOutcome::Loaded(added)
            }
            Err(e) => {
                tracing::error!("Failed to load vocabulary: {}", e);
                LoadOutcome::Failed
            }
        }
    }

    /// Continue from the last cursor. Never runs two fetches at once.
    pub async fn load_more(&self) -> LoadOutcome {
        let Some(_guard) = self.begin_fetch() else {
            tracing::debug!("Library fetch already in flight");
            return LoadOutcome::Busy;
        };

        let cursor = {
            let mirror = self.mirror.read().await;
            if mirror.exhausted {
                return LoadOutcome::Exhausted;
            }
            mirror.cursor.clone()
        };

        match self.load_page(cursor.as_deref()).await {
            Ok(page) => {
                let mut mirror = self.mirror.write().await;
                let added = self.apply(&mut mirror, page);
                tracing::debug!("Library grew by {} to {}", added, mirror.entries.len());
                LoadOutcome::Loaded(added)
            }
            Err(e) => {
                tracing::warn!("Failed to load more vocabulary: {}", e);
                LoadOutcome::Failed
            }
        }
    }

    /// Entries matching `input` exactly on either field (ignoring case),
    /// otherwise entries containing it, otherwise nothing.
    pub async fn search(&self, input: &str) -> Vec<VocabularyEntry> {
        let needle = DefaultPreprocessor.process(input).to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mirror = self.mirror.read().await;

        let exact: Vec<VocabularyEntry> = mirror
            .entries
            .iter()
            .filter(|e| e.bangla.to_lowercase() == needle || e.korean.to_lowercase() == needle)
            .cloned()
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        mirror
            .entries
            .iter()
            .filter(|e| {
                e.bangla.to_lowercase().contains(&needle)
                    || e.korean.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub async fn entries(&self) -> Vec<VocabularyEntry> {
        self.mirror.read().await.entries.clone()
    }

    pub async fn is_exhausted(&self) -> bool {
        self.mirror.read().await.exhausted
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// Whether the consumer has scrolled within `threshold` (a fraction of
    /// the list length) of the end of `rendered_len` rows.
    pub fn should_load_more(last_visible: usize, rendered_len: usize, threshold: f32) -> bool {
        if rendered_len == 0 {
            return true;
        }
        let remaining = rendered_len.saturating_sub(last_visible + 1) as f32;
        remaining <= rendered_len as f32 * threshold
    }

    fn begin_fetch(&self) -> Option<FetchGuard<'_>> {
        self.fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FetchGuard(&self.fetching))
    }

    fn apply(&self, mirror: &mut Mirror, page: PageLoad) -> usize {
        if page.entries.len() < self.page_size {
            mirror.exhausted = true;
        }
        if page.next_cursor.is_some() {
            mirror.cursor = page.next_cursor;
        }
        mirror.merge(page.entries)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use shobdo_types::Language;
    use tokio::sync::Notify;

    use super::*;
    use crate::store::MemoryStore;

    fn config(page_size: usize) -> LibraryConfig {
        LibraryConfig {
            page_size,
            ..LibraryConfig::default()
        }
    }

    fn entry(id: &str, bangla: &str, korean: &str) -> VocabularyEntry {
        VocabularyEntry::new(id, bangla, korean)
    }

    #[tokio::test]
    async fn test_refresh_loads_first_page() {
        let store = Arc::new(MemoryStore::new(
            (0..30).map(|i| entry(&i.to_string(), &format!("b{i}"), &format!("k{i}"))).collect(),
        ));
        let index = LibraryIndex::new(store, &LibraryConfig::default());

        assert_eq!(index.refresh().await, LoadOutcome::Loaded(25));
        assert_eq!(index.load_more().await, LoadOutcome::Loaded(5));
        assert!(index.is_exhausted().await);
        assert_eq!(index.load_more().await, LoadOutcome::Exhausted);
        assert_eq!(index.entries().await.len(), 30);
    }

    #[tokio::test]
    async fn test_page_cursor_is_last_store_id() {
        let store = Arc::new(MemoryStore::new(vec![
            entry("a", "b1", "k1"),
            entry("b", "b1", "k2"),
            entry("c", "b3", "k3"),
        ]));
        let index = LibraryIndex::new(store, &config(2));

        let page = index.load_page(None).await.unwrap();
        assert_eq!(page.next_cursor.as_deref(), Some("b"));

        // The dropped duplicate still advances the cursor
        assert_eq!(index.refresh().await, LoadOutcome::Loaded(1));
        assert_eq!(index.load_more().await, LoadOutcome::Loaded(1));
        let ids: Vec<String> = index.entries().await.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_shared_bangla_is_dropped_across_pages() {
        let store = Arc::new(MemoryStore::new(vec![
            entry("1", "পানি", "물"),
            entry("2", "ভাত", "밥"),
            entry("3", "পানি", "음료"),
        ]));
        let index = LibraryIndex::new(store, &config(2));

        index.refresh().await;
        assert_eq!(index.load_more().await, LoadOutcome::Loaded(0));

        let entries = index.entries().await;
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.korean != "음료"));
    }

    #[tokio::test]
    async fn test_shared_korean_is_dropped() {
        let store = Arc::new(MemoryStore::new(vec![
            entry("1", "পানি", "물"),
            entry("2", "জল", "물"),
        ]));
        let index = LibraryIndex::new(store, &LibraryConfig::default());

        assert_eq!(index.refresh().await, LoadOutcome::Loaded(1));
        assert_eq!(index.entries().await[0].bangla, "পানি");
    }

    #[test]
    fn test_value_in_other_field_counts_as_duplicate() {
        let mut mirror = Mirror::default();
        mirror.merge(vec![entry("1", "ok", "네")]);
        assert_eq!(mirror.merge(vec![entry("2", "네", "হ্যাঁ")]), 0);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_mirror() {
        let store = Arc::new(MemoryStore::new(vec![entry("1", "পানি", "물")]));
        let index = LibraryIndex::new(store.clone(), &LibraryConfig::default());
        index.refresh().await;

        store.set_offline(true);
        assert_eq!(index.refresh().await, LoadOutcome::Failed);
        assert_eq!(index.entries().await.len(), 1);
        assert!(!index.is_fetching());
    }

    #[tokio::test]
    async fn test_search_prefers_exact_match() {
        let store = Arc::new(MemoryStore::new(vec![
            entry("1", "পানি", "물"),
            entry("2", "পানীয়", "물건"),
        ]));
        let index = LibraryIndex::new(store, &LibraryConfig::default());
        index.refresh().await;

        let exact = index.search(" 물 ").await;
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].id, "1");

        let partial = index.search("পান").await;
        assert_eq!(partial.len(), 2);

        assert!(index.search("zzz").await.is_empty());
        assert!(index.search("   ").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_ignores_case() {
        let store = Arc::new(MemoryStore::new(vec![entry("1", "OK", "네")]));
        let index = LibraryIndex::new(store, &LibraryConfig::default());
        index.refresh().await;

        assert_eq!(index.search("ok").await.len(), 1);
    }

    /// Store whose page fetch blocks until released
    struct GatedStore {
        inner: MemoryStore,
        gate: Notify,
    }

    #[async_trait]
    impl VocabularyStore for GatedStore {
        async fn search(
            &self,
            field: Language,
            term: &str,
            limit: Option<usize>,
        ) -> Result<Vec<VocabularyEntry>, StoreError> {
            self.inner.search(field, term, limit).await
        }

        async fn list_page(
            &self,
            cursor: Option<&str>,
            page_size: usize,
        ) -> Result<Vec<VocabularyEntry>, StoreError> {
            self.gate.notified().await;
            self.inner.list_page(cursor, page_size).await
        }
    }

    #[tokio::test]
    async fn test_single_fetch_in_flight() {
        let store = Arc::new(GatedStore {
            inner: MemoryStore::new(vec![entry("1", "পানি", "물")]),
            gate: Notify::new(),
        });
        let index = Arc::new(LibraryIndex::new(store.clone(), &LibraryConfig::default()));

        let first = tokio::spawn({
            let index = index.clone();
            async move { index.load_more().await }
        });
        while !index.is_fetching() {
            tokio::task::yield_now().await;
        }

        assert_eq!(index.load_more().await, LoadOutcome::Busy);
        assert_eq!(index.refresh().await, LoadOutcome::Busy);

        store.gate.notify_one();
        let outcome = tokio::time::timeout(Duration::from_secs(1), first)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded(1));
        assert!(!index.is_fetching());
    }

    #[test]
    fn test_should_load_more_near_end() {
        assert!(LibraryIndex::should_load_more(0, 0, 0.1));
        assert!(!LibraryIndex::should_load_more(10, 100, 0.1));
        assert!(LibraryIndex::should_load_more(89, 100, 0.1));
        assert!(LibraryIndex::should_load_more(99, 100, 0.1));
    }
}
