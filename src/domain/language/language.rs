use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// ISO 639-1 language codes supported for synthesis and translation.
///
/// Deserialization also accepts the UI flag code `gb` and maps it to English,
/// so display identifiers never travel past the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LanguageCode {
    Czech,
    English,
    German,
    Spanish,
    French,
}

/// Languages offered as the learner's native language
pub const NATIVE_LANGUAGES: [LanguageCode; 2] = [LanguageCode::Czech, LanguageCode::English];

/// Languages offered as the language being learned
pub const FOREIGN_LANGUAGES: [LanguageCode; 4] = [
    LanguageCode::German,
    LanguageCode::Spanish,
    LanguageCode::French,
    LanguageCode::English,
];

impl LanguageCode {
    pub const ALL: [LanguageCode; 5] = [
        LanguageCode::Czech,
        LanguageCode::English,
        LanguageCode::German,
        LanguageCode::Spanish,
        LanguageCode::French,
    ];

    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Czech => "cs",
            LanguageCode::English => "en",
            LanguageCode::German => "de",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
        }
    }

    /// Resolve a synthesis code or a flag/display code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "cs" => Some(LanguageCode::Czech),
            // "gb" is the United Kingdom flag shown in the UI
            "en" | "gb" => Some(LanguageCode::English),
            "de" => Some(LanguageCode::German),
            "es" => Some(LanguageCode::Spanish),
            "fr" => Some(LanguageCode::French),
            _ => None,
        }
    }

    /// Flag image identifier used by the UI
    pub fn flag_code(&self) -> &'static str {
        match self {
            LanguageCode::English => "gb",
            other => other.as_str(),
        }
    }

    /// English name, used when instructing the translation model
    pub fn english_name(&self) -> &'static str {
        match self {
            LanguageCode::Czech => "Czech",
            LanguageCode::English => "English",
            LanguageCode::German => "German",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::French => "French",
        }
    }

    pub fn czech_name(&self) -> &'static str {
        match self {
            LanguageCode::Czech => "Čeština",
            LanguageCode::English => "Angličtina",
            LanguageCode::German => "Němčina",
            LanguageCode::Spanish => "Španělština",
            LanguageCode::French => "Francouzština",
        }
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        match language {
            Language::Czech => LanguageCode::Czech,
            Language::English => LanguageCode::English,
            Language::German => LanguageCode::German,
            Language::Spanish => LanguageCode::Spanish,
            Language::French => LanguageCode::French,
        }
    }

    pub fn to_lingua(self) -> Language {
        match self {
            LanguageCode::Czech => Language::Czech,
            LanguageCode::English => Language::English,
            LanguageCode::German => Language::German,
            LanguageCode::Spanish => Language::Spanish,
            LanguageCode::French => Language::French,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::from_code(s).ok_or_else(|| format!("Unsupported language code: {}", s))
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.as_str().to_string()
    }
}

/// Checks whether a column of phrases is written in the expected language.
pub struct LanguageGuard {
    detector: LanguageDetector,
}

impl LanguageGuard {
    pub fn new() -> Self {
        let languages: Vec<Language> = LanguageCode::ALL.iter().map(|l| l.to_lingua()).collect();
        let detector = LanguageDetectorBuilder::from_languages(&languages).build();
        Self { detector }
    }

    /// Detect the language of the given text
    pub fn detect(&self, text: &str) -> Option<LanguageCode> {
        self.detector
            .detect_language_of(text)
            .map(LanguageCode::from_lingua)
    }

    /// Returns the detected language when it differs from `expected`.
    pub fn mismatch<'a, I>(&self, texts: I, expected: LanguageCode) -> Option<LanguageCode>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let joined = texts.into_iter().collect::<Vec<_>>().join(". ");
        if joined.trim().is_empty() {
            return None;
        }

        match self.detect(&joined) {
            Some(detected) if detected != expected => Some(detected),
            _ => None,
        }
    }
}

impl Default for LanguageGuard {
    fn default() -> Self {
        Self::new()
    }
}
