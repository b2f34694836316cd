use serde::{Deserialize, Serialize};

/// The two languages a vocabulary pair is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Bangla,
    Korean,
}

impl Language {
    /// ISO 639-1 code used by the translation endpoint
    pub fn code(&self) -> &'static str {
        match self {
            Language::Bangla => "bn",
            Language::Korean => "ko",
        }
    }

    /// Document field holding text in this language
    pub fn field(&self) -> &'static str {
        match self {
            Language::Bangla => "bangla",
            Language::Korean => "korean",
        }
    }

    pub fn opposite(&self) -> Language {
        match self {
            Language::Bangla => Language::Korean,
            Language::Korean => Language::Bangla,
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.to_ascii_lowercase().as_str() {
            "bn" | "bangla" => Some(Language::Bangla),
            "ko" | "korean" => Some(Language::Korean),
            _ => None,
        }
    }
}

/// One Bangla/Korean word pair from the remote store.
///
/// `id` is assigned by the store and is only meaningful as a pagination
/// cursor; identity for dedup and favorites is the (bangla, korean) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    #[serde(rename = "$id", alias = "id", default)]
    pub id: String,
    pub bangla: String,
    pub korean: String,
    /// Store-provided frequency rank (lower = more common)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
}

impl VocabularyEntry {
    pub fn new(id: impl Into<String>, bangla: impl Into<String>, korean: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bangla: bangla.into(),
            korean: korean.into(),
            frequency: None,
        }
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Text of the given language's field
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::Bangla => &self.bangla,
            Language::Korean => &self.korean,
        }
    }

    pub fn same_pair(&self, bangla: &str, korean: &str) -> bool {
        self.bangla == bangla && self.korean == korean
    }
}

impl From<&SearchResult> for VocabularyEntry {
    fn from(result: &SearchResult) -> Self {
        VocabularyEntry::new(String::new(), result.bangla.clone(), result.korean.clone())
    }
}

/// A bookmarked pair stamped with the time it was bookmarked (epoch ms)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    #[serde(flatten)]
    pub entry: VocabularyEntry,
    pub timestamp: i64,
}

impl FavoriteEntry {
    pub fn bangla(&self) -> &str {
        &self.entry.bangla
    }

    pub fn korean(&self) -> &str {
        &self.entry.korean
    }

    pub fn matches(&self, entry: &VocabularyEntry) -> bool {
        entry.same_pair(&self.entry.bangla, &self.entry.korean)
    }
}

/// Favorites grouped under one calendar-day label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteBucket {
    pub label: String,
    pub entries: Vec<FavoriteEntry>,
}

/// Autocomplete candidate projected onto one language field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionCandidate {
    pub id: String,
    pub text: String,
    pub frequency: Option<u32>,
}

/// Unified search row, either a store match or a synthesized translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub bangla: String,
    pub korean: String,
}

impl SearchResult {
    pub fn new(bangla: impl Into<String>, korean: impl Into<String>) -> Self {
        Self {
            bangla: bangla.into(),
            korean: korean.into(),
        }
    }

    /// Text placed on the clipboard or handed to the share sheet
    pub fn share_text(&self) -> String {
        format!("Bangla: {}\nKorean: {}", self.bangla, self.korean)
    }
}

impl From<VocabularyEntry> for SearchResult {
    fn from(entry: VocabularyEntry) -> Self {
        Self {
            bangla: entry.bangla,
            korean: entry.korean,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    ShowSuggestions(Vec<SuggestionCandidate>),
    ShowInput(String),
    ShowResults(Vec<SearchResult>),
    ShowLibrary(Vec<VocabularyEntry>),
    ShowFavorites(Vec<FavoriteBucket>),
    Notice { title: String, message: String },
    BackendReady,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    SelectLanguage(Language),
    TextInput(String),
    CommitKey,
    SelectSuggestion(usize),
    Search,
    ClearInput,
    PasteFromClipboard,
    ToggleFavorite(usize),
    RemoveFavorite(usize),
    CopyResult(usize),
    ShareResult(usize),
    SpeakResult(usize),
    ShowFavorites,
    RefreshLibrary,
    LoadMoreLibrary,
    SearchLibrary(String),
    ToggleLibraryFavorite(usize),
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_decodes_store_document() {
        let json = r#"{"$id":"abc","bangla":"পানি","korean":"물","frequency":3,"$collectionId":"x"}"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "abc");
        assert_eq!(entry.korean, "물");
        assert_eq!(entry.frequency, Some(3));
    }

    #[test]
    fn test_favorite_without_id_decodes() {
        let json = r#"[{"bangla":"পানি","korean":"물","timestamp":1700000000000}]"#;
        let favorites: Vec<FavoriteEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(favorites.len(), 1);
        assert!(favorites[0].entry.id.is_empty());
        assert_eq!(favorites[0].timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_share_text_format() {
        let result = SearchResult::new("পানি", "물");
        assert_eq!(result.share_text(), "Bangla: পানি\nKorean: 물");
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Bangla.code(), "bn");
        assert_eq!(Language::Korean.field(), "korean");
        assert_eq!(Language::from_code("KO"), Some(Language::Korean));
        assert_eq!(Language::from_code("en"), None);
        assert_eq!(Language::Bangla.opposite(), Language::Korean);
    }
}
