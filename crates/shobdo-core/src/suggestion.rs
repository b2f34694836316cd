use std::cmp::Ordering;
use std::sync::Arc;

use shobdo_config::suggestions::SuggestionConfig;
use shobdo_types::{Language, SuggestionCandidate, VocabularyEntry};

use crate::store::VocabularyStore;

/// Prefix autocomplete over the remote vocabulary
pub struct SuggestionEngine {
    store: Arc<dyn VocabularyStore>,
    limit: usize,
}

impl SuggestionEngine {
    pub fn new(store: Arc<dyn VocabularyStore>, config: &SuggestionConfig) -> Self {
        Self {
            store,
            limit: config.limit,
        }
    }

    /// Ranked completions for `input` in `language`.
    ///
    /// Best effort: store failures are logged and yield no suggestions.
    pub async fn suggest(&self, input: &str, language: Language) -> Vec<SuggestionCandidate> {
        if input.is_empty() {
            return Vec::new();
        }

        let documents = match self.store.search(language, input, Some(self.limit)).await {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!("Suggestion fetch for '{}' failed: {}", input, e);
                return Vec::new();
            }
        };

        let candidates = rank(documents, input, language);
        tracing::debug!("{} suggestions for '{}'", candidates.len(), input);
        candidates
    }

    /// Inline autocomplete on the commit key: the buffer followed by whatever
    /// of the top candidate lies beyond what has been typed.
    pub fn commit(buffer: &str, candidates: &[SuggestionCandidate]) -> Option<String> {
        let top = candidates.first()?;
        let typed = buffer.chars().count();
        let remainder: String = top.text.chars().skip(typed).collect();

        Some(format!("{buffer}{remainder}"))
    }
}

/// Keep documents whose `language` field starts with `input` (ignoring case)
/// and order them shortest first, then most frequent first.
pub fn rank(
    documents: Vec<VocabularyEntry>,
    input: &str,
    language: Language,
) -> Vec<SuggestionCandidate> {
    let needle = input.to_lowercase();

    let mut candidates: Vec<SuggestionCandidate> = documents
        .into_iter()
        .filter(|doc| doc.text(language).to_lowercase().starts_with(&needle))
        .map(|doc| SuggestionCandidate {
            text: doc.text(language).to_string(),
            id: doc.id,
            frequency: doc.frequency,
        })
        .collect();

    candidates.sort_by(compare_candidates);
    candidates
}

fn compare_candidates(a: &SuggestionCandidate, b: &SuggestionCandidate) -> Ordering {
    // Unranked words sort after every ranked one
    let rank = |c: &SuggestionCandidate| c.frequency.unwrap_or(u32::MAX);

    a.text
        .chars()
        .count()
        .cmp(&b.text.chars().count())
        .then_with(|| rank(a).cmp(&rank(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine(entries: Vec<VocabularyEntry>) -> (SuggestionEngine, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new(entries));
        let engine = SuggestionEngine::new(store.clone(), &SuggestionConfig::default());
        (engine, store)
    }

    fn candidate(text: &str) -> SuggestionCandidate {
        SuggestionCandidate {
            id: text.to_string(),
            text: text.to_string(),
            frequency: Some(1),
        }
    }

    #[tokio::test]
    async fn test_empty_input_returns_nothing() {
        let (engine, store) = engine(vec![VocabularyEntry::new("1", "পানি", "물")]);
        store.set_offline(true);
        assert!(engine.suggest("", Language::Korean).await.is_empty());
    }

    #[tokio::test]
    async fn test_substring_only_match_is_filtered() {
        let (engine, _) = engine(vec![
            VocabularyEntry::new("1", "x", "Banana"),
            VocabularyEntry::new("2", "y", "urban"),
        ]);
        assert!(engine.suggest("an", Language::Korean).await.is_empty());
    }

    #[tokio::test]
    async fn test_prefix_match_ignores_case() {
        let (engine, _) = engine(vec![VocabularyEntry::new("1", "x", "Apple")]);
        let suggestions = engine.suggest("ap", Language::Korean).await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].text, "Apple");
    }

    #[tokio::test]
    async fn test_sorted_by_length() {
        let (engine, _) = engine(vec![
            VocabularyEntry::new("1", "abcd", "가").with_frequency(1),
            VocabularyEntry::new("2", "ab", "나").with_frequency(1),
            VocabularyEntry::new("3", "abc", "다").with_frequency(1),
        ]);
        let texts: Vec<String> = engine
            .suggest("ab", Language::Bangla)
            .await
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["ab", "abc", "abcd"]);
    }

    #[tokio::test]
    async fn test_frequency_breaks_length_ties() {
        let (engine, _) = engine(vec![
            VocabularyEntry::new("1", "x", "물건").with_frequency(40),
            VocabularyEntry::new("2", "y", "물고"),
            VocabularyEntry::new("3", "z", "물개").with_frequency(2),
        ]);
        let ids: Vec<String> = engine
            .suggest("물", Language::Korean)
            .await
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[tokio::test]
    async fn test_store_failure_is_swallowed() {
        let (engine, store) = engine(vec![VocabularyEntry::new("1", "পানি", "물")]);
        store.set_offline(true);
        assert!(engine.suggest("물", Language::Korean).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_is_bounded_before_filtering() {
        let mut entries: Vec<VocabularyEntry> = (0..7)
            .map(|i| VocabularyEntry::new(i.to_string(), format!("কপা{i}"), "x"))
            .collect();
        entries.push(VocabularyEntry::new("p", "পা", "y"));
        let (engine, _) = engine(entries);

        // The only prefix match is the eighth substring hit
        assert!(engine.suggest("পা", Language::Bangla).await.is_empty());
    }

    #[test]
    fn test_commit_appends_remainder() {
        let candidates = vec![candidate("hello"), candidate("help")];
        assert_eq!(
            SuggestionEngine::commit("he", &candidates),
            Some("hello".to_string())
        );
    }

    #[test]
    fn test_commit_counts_characters() {
        let candidates = vec![candidate("안녕하세요")];
        assert_eq!(
            SuggestionEngine::commit("안녕", &candidates),
            Some("안녕하세요".to_string())
        );
    }

    #[test]
    fn test_commit_without_candidates() {
        assert_eq!(SuggestionEngine::commit("he", &[]), None);
    }
}
