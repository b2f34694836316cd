use std::sync::{Arc, Mutex};
use std::time::Duration;

use shobdo_config::Config;
use shobdo_core::capabilities::{ClipboardAccess, ShareSheet, Speaker, SpeechToggle};
use shobdo_core::debounce::Debouncer;
use shobdo_core::favorites::FavoritesStore;
use shobdo_core::library::LibraryIndex;
use shobdo_core::search::SearchResolver;
use shobdo_core::session::SuggestionSession;
use shobdo_core::store::VocabularyStore;
use shobdo_core::suggestion::SuggestionEngine;
use shobdo_translator::Translator;
use shobdo_types::{FavoriteEntry, Language, SearchResult, VocabularyEntry};
use tokio::sync::RwLock;

/// Injected device capabilities
pub struct Devices {
    pub clipboard: Option<Arc<dyn ClipboardAccess>>,
    pub share: Arc<dyn ShareSheet>,
    pub speaker: Arc<dyn Speaker>,
}

/// Composition root: every service the event loop talks to
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: SuggestionSession,
    pub resolver: SearchResolver,
    pub favorites: Arc<FavoritesStore>,
    pub library: Arc<LibraryIndex>,
    pub devices: Devices,

    /// Rows currently shown on the search screen
    pub results: RwLock<Vec<SearchResult>>,
    /// Favorites in the order they were last listed
    pub listed_favorites: RwLock<Vec<FavoriteEntry>>,
    /// Rows currently shown on the library screen
    pub listed_library: RwLock<Vec<VocabularyEntry>>,
    pub library_search: Debouncer,
    pub speech: Mutex<SpeechToggle>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn VocabularyStore>,
        translator: Option<Arc<dyn Translator>>,
        favorites: Arc<FavoritesStore>,
        devices: Devices,
    ) -> Self {
        let engine = Arc::new(SuggestionEngine::new(store.clone(), &config.suggestions));
        let session = SuggestionSession::new(
            engine,
            Language::Bangla,
            Duration::from_millis(config.suggestions.debounce_ms),
        );
        let resolver = SearchResolver::new(store.clone(), translator);
        let library = Arc::new(LibraryIndex::new(store, &config.library));
        let library_search =
            Debouncer::new(Duration::from_millis(config.library.search_debounce_ms));

        Self {
            config: Arc::new(RwLock::new(config)),
            session,
            resolver,
            favorites,
            library,
            devices,
            results: RwLock::new(Vec::new()),
            listed_favorites: RwLock::new(Vec::new()),
            listed_library: RwLock::new(Vec::new()),
            library_search,
            speech: Mutex::new(SpeechToggle::default()),
        }
    }
}
