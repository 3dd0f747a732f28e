use super::model::{FileFormat, PhrasePair};
use crate::domain::language::LanguageCode;
use crate::domain::translation::TranslationWarning;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content: String,
}

/// Request for POST /api/phrases/batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseBatchRequest {
    pub native_language: LanguageCode,
    pub foreign_language: LanguageCode,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Error,
}

/// Outcome for one uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub name: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FileFormat>,
    pub count: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// Response for POST /api/phrases/batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseBatch {
    /// Digest of the final ordered pairs
    pub content_hash: String,
    pub files: Vec<FileReport>,
    pub pairs: Vec<PhrasePair>,
    pub translated_count: usize,
    pub warnings: Vec<String>,
    #[serde(default)]
    pub translation_failures: Vec<TranslationWarning>,
}

/// Request for POST /api/phrases/export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub native_language: LanguageCode,
    pub foreign_language: LanguageCode,
    pub pairs: Vec<PhrasePair>,
}
