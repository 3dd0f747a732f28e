use super::delimiter::Delimiter;
use crate::domain::language::LanguageCode;
use serde::{Deserialize, Serialize};

/// A native phrase and its foreign counterpart, both trimmed and non-empty
/// when produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhrasePair {
    pub native: String,
    pub foreign: String,
}

impl PhrasePair {
    pub fn new(native: impl Into<String>, foreign: impl Into<String>) -> Self {
        Self {
            native: native.into(),
            foreign: foreign.into(),
        }
    }
}

/// A foreign phrase still waiting for its native translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignOnlyPhrase {
    pub text: String,
}

impl ForeignOnlyPhrase {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Completes the phrase once its translation is known
    pub fn into_pair(self, native: String) -> PhrasePair {
        PhrasePair {
            native,
            foreign: self.text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    Bilingual,
    ForeignOnly,
}

/// Result of parsing one uploaded file. A file is either entirely bilingual or
/// entirely foreign-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFile {
    Bilingual {
        delimiter: Delimiter,
        pairs: Vec<PhrasePair>,
    },
    ForeignOnly {
        phrases: Vec<ForeignOnlyPhrase>,
    },
}

impl ParsedFile {
    pub fn format(&self) -> FileFormat {
        match self {
            ParsedFile::Bilingual { .. } => FileFormat::Bilingual,
            ParsedFile::ForeignOnly { .. } => FileFormat::ForeignOnly,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ParsedFile::Bilingual { pairs, .. } => pairs.len(),
            ParsedFile::ForeignOnly { phrases } => phrases.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable count, e.g. "Loaded 2 Czech-Spanish pairs"
    pub fn summary(&self, native: LanguageCode, foreign: LanguageCode) -> String {
        match self {
            ParsedFile::Bilingual { pairs, .. } => format!(
                "Loaded {} {}-{} pairs",
                pairs.len(),
                native.english_name(),
                foreign.english_name()
            ),
            ParsedFile::ForeignOnly { phrases } => format!(
                "Loaded {} {}-only phrases",
                phrases.len(),
                foreign.english_name()
            ),
        }
    }
}
