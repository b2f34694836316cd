use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Composed form so Hangul syllables and Bangla vowel signs compare equal
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        let text: String = text.nfc().collect();

        text.replace(['\n', '\r'], " ").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
