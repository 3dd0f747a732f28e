use axum::Json;
use serde::Serialize;

use crate::domain::language::{LanguageCode, FOREIGN_LANGUAGES, NATIVE_LANGUAGES};

#[derive(Debug, Serialize)]
pub struct LanguageOption {
    /// Code sent to speech synthesis
    pub code: LanguageCode,
    /// Flag image identifier for display only
    pub flag: &'static str,
    pub name: &'static str,
    pub name_cs: &'static str,
}

impl From<LanguageCode> for LanguageOption {
    fn from(code: LanguageCode) -> Self {
        Self {
            code,
            flag: code.flag_code(),
            name: code.english_name(),
            name_cs: code.czech_name(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub native: Vec<LanguageOption>,
    pub foreign: Vec<LanguageOption>,
}

/// GET /api/languages
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        native: NATIVE_LANGUAGES.into_iter().map(LanguageOption::from).collect(),
        foreign: FOREIGN_LANGUAGES.into_iter().map(LanguageOption::from).collect(),
    })
}
