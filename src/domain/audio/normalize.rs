use crate::domain::language::LanguageCode;
use std::collections::HashMap;

/// Prepares phrase text for speech synthesis.
///
/// Every language gets the same base cleanup (replacement characters and
/// control characters dropped, whitespace collapsed). Languages can add extra
/// characters to strip; Spanish strips its inverted punctuation by default.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stripped: HashMap<LanguageCode, Vec<char>>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::empty().with_rule(LanguageCode::Spanish, ['¿', '¡'])
    }
}

impl TextNormalizer {
    /// A normalizer with only the base cleanup
    pub fn empty() -> Self {
        Self {
            stripped: HashMap::new(),
        }
    }

    /// Strip the given characters from text in `language`
    pub fn with_rule(mut self, language: LanguageCode, chars: impl IntoIterator<Item = char>) -> Self {
        self.stripped.entry(language).or_default().extend(chars);
        self
    }

    pub fn normalize(&self, text: &str, language: LanguageCode) -> String {
        let stripped = self.stripped.get(&language);

        let cleaned: String = text
            .chars()
            .filter(|c| *c != char::REPLACEMENT_CHARACTER)
            .filter(|c| !stripped.is_some_and(|set| set.contains(c)))
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();

        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
