use shobdo_types::Language;

/// Source and target of a fallback translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub source: Language,
    pub target: Language,
}

fn is_bangla(c: char) -> bool {
    ('\u{0980}'..='\u{09FF}').contains(&c)
}

fn is_hangul(c: char) -> bool {
    ('\u{AC00}'..='\u{D7AF}').contains(&c)
        || ('\u{1100}'..='\u{11FF}').contains(&c)
        || ('\u{3130}'..='\u{318F}').contains(&c)
}

/// Pick the translation direction from the script of `text`.
///
/// Any Bangla codepoint wins over Hangul, matching how mixed input is
/// treated by the search screen. `None` when neither script is present.
pub fn detect_direction(text: &str) -> Option<Direction> {
    let source = if text.chars().any(is_bangla) {
        Language::Bangla
    } else if text.chars().any(is_hangul) {
        Language::Korean
    } else {
        return None;
    };

    Some(Direction {
        source,
        target: source.opposite(),
    })
}
