use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use shobdo_types::{Language, SuggestionCandidate};
use tokio::sync::watch;

use crate::debounce::Debouncer;
use crate::suggestion::SuggestionEngine;

/// What the search box shows: the input buffer and its suggestion list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionView {
    pub input: String,
    pub suggestions: Vec<SuggestionCandidate>,
}

struct SessionState {
    language: Language,
    input: String,
    suggestions: Vec<SuggestionCandidate>,
    /// Bumped on every intent change; responses from older generations are dropped
    generation: u64,
}

/// Search box state machine around a [`SuggestionEngine`].
///
/// Keystrokes are debounced; a fetch whose input is no longer current when it
/// resolves is discarded so the list never flickers back to stale results.
pub struct SuggestionSession {
    engine: Arc<SuggestionEngine>,
    debouncer: Debouncer,
    state: Arc<Mutex<SessionState>>,
    view: Arc<watch::Sender<SuggestionView>>,
}

impl SuggestionSession {
    pub fn new(engine: Arc<SuggestionEngine>, language: Language, debounce: Duration) -> Self {
        let (view, _) = watch::channel(SuggestionView::default());

        Self {
            engine,
            debouncer: Debouncer::new(debounce),
            state: Arc::new(Mutex::new(SessionState {
                language,
                input: String::new(),
                suggestions: Vec::new(),
                generation: 0,
            })),
            view: Arc::new(view),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionView> {
        self.view.subscribe()
    }

    pub fn input(&self) -> String {
        lock(&self.state).input.clone()
    }

    pub fn language(&self) -> Language {
        lock(&self.state).language
    }

    pub fn suggestions(&self) -> Vec<SuggestionCandidate> {
        lock(&self.state).suggestions.clone()
    }

    pub fn set_language(&self, language: Language) {
        self.debouncer.cancel();
        let mut state = lock(&self.state);
        state.language = language;
        state.generation += 1;
        state.suggestions.clear();
        publish(&self.view, &state);
    }

    /// The user edited the buffer. Suggestions are cleared right away and
    /// refetched once typing pauses.
    pub fn input_changed(&self, text: &str) {
        let (generation, language) = {
            let mut state = lock(&self.state);
            state.input = text.to_string();
            state.suggestions.clear();
            state.generation += 1;
            publish(&self.view, &state);
            (state.generation, state.language)
        };

        if text.is_empty() {
            self.debouncer.cancel();
            return;
        }

        let engine = self.engine.clone();
        let state = self.state.clone();
        let view = self.view.clone();
        let input = text.to_string();

        self.debouncer.schedule(async move {
            let suggestions = engine.suggest(&input, language).await;

            let mut state = lock(&state);
            if state.generation != generation || state.input != input {
                tracing::debug!("Dropping stale suggestions for '{}'", input);
                return;
            }
            state.suggestions = suggestions;
            publish(&view, &state);
        });
    }

    /// Commit key (space): complete the buffer from the top suggestion.
    /// Returns the new buffer, or `None` when there was nothing to complete.
    pub fn commit_key(&self) -> Option<String> {
        let mut state = lock(&self.state);
        let completed = SuggestionEngine::commit(&state.input, &state.suggestions)?;

        self.debouncer.cancel();
        state.input = completed.clone();
        state.suggestions.clear();
        state.generation += 1;
        publish(&self.view, &state);
        Some(completed)
    }

    /// Replace the buffer with the chosen suggestion without refetching
    pub fn select(&self, index: usize) -> Option<String> {
        let mut state = lock(&self.state);
        let chosen = state.suggestions.get(index)?.text.clone();

        self.debouncer.cancel();
        state.input = chosen.clone();
        state.suggestions.clear();
        state.generation += 1;
        publish(&self.view, &state);
        Some(chosen)
    }

    pub fn clear(&self) {
        self.debouncer.cancel();
        let mut state = lock(&self.state);
        state.input.clear();
        state.suggestions.clear();
        state.generation += 1;
        publish(&self.view, &state);
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn publish(view: &watch::Sender<SuggestionView>, state: &SessionState) {
    view.send_replace(SuggestionView {
        input: state.input.clone(),
        suggestions: state.suggestions.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use shobdo_config::suggestions::SuggestionConfig;
    use shobdo_types::VocabularyEntry;

    fn session() -> SuggestionSession {
        let store = Arc::new(MemoryStore::new(vec![
            VocabularyEntry::new("1", "পানি", "물").with_frequency(5),
            VocabularyEntry::new("2", "পানীয়", "물건").with_frequency(9),
            VocabularyEntry::new("3", "ভাত", "밥").with_frequency(1),
        ]));
        let engine = Arc::new(SuggestionEngine::new(store, &SuggestionConfig::default()));
        SuggestionSession::new(engine, Language::Korean, Duration::from_millis(300))
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(350)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggestions_arrive_after_quiet_window() {
        let session = session();
        session.input_changed("물");
        assert!(session.suggestions().is_empty());

        settle().await;
        let texts: Vec<String> = session.suggestions().into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["물", "물건"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_input_is_not_shown() {
        let session = session();
        session.input_changed("물");
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.input_changed("밥");

        settle().await;
        let texts: Vec<String> = session.suggestions().into_iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["밥"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_key_completes_and_clears() {
        let session = session();
        session.set_language(Language::Bangla);
        session.input_changed("পা");
        settle().await;
        assert_eq!(session.suggestions().len(), 2);

        assert_eq!(session.commit_key(), Some("পানি".to_string()));
        assert_eq!(session.input(), "পানি");
        assert!(session.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_key_without_suggestions_is_noop() {
        let session = session();
        session.input_changed("zz");
        settle().await;
        assert_eq!(session.commit_key(), None);
        assert_eq!(session.input(), "zz");
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_replaces_buffer() {
        let session = session();
        session.input_changed("물");
        settle().await;

        assert_eq!(session.select(1), Some("물건".to_string()));
        assert_eq!(session.input(), "물건");
        assert!(session.suggestions().is_empty());
        assert_eq!(session.select(5), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_pending_fetch() {
        let session = session();
        let mut view = session.subscribe();
        session.input_changed("물");
        session.clear();

        settle().await;
        assert!(session.suggestions().is_empty());
        view.mark_changed();
        assert_eq!(view.borrow_and_update().input, "");
    }
}
