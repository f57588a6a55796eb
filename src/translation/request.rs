use super::cache::CacheKey;

/// A single string to translate, with its language pair
///
/// Immutable once built. Empty text is a valid request that translates to
/// an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationRequest {
    text: String,
    source_language: String,
    target_language: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Empty or whitespace-only text; nothing to translate
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Source and target are the same code, compared verbatim
    pub fn is_identity(&self) -> bool {
        self.source_language == self.target_language
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.text, &self.source_language, &self.target_language)
    }
}
