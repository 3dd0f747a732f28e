use super::delimiter::DelimiterSet;
use super::dto::{ExportRequest, FileReport, FileStatus, PhraseBatch, PhraseBatchRequest};
use super::error::PhraseServiceError;
use super::model::{ForeignOnlyPhrase, ParsedFile, PhrasePair};
use super::parser::parse_file;
use crate::domain::language::{LanguageCode, LanguageGuard};
use crate::domain::shared::{ContentDigest, ProgressSender};
use crate::domain::translation::TranslationService;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

pub struct PhraseService {
    delimiters: DelimiterSet,
    translation_service: Arc<TranslationService>,
    language_guard: Option<LanguageGuard>,
    cache: Option<Cache<String, PhraseBatch>>,
}

impl PhraseService {
    pub fn new(
        delimiters: DelimiterSet,
        translation_service: Arc<TranslationService>,
        language_check_enabled: bool,
        cache_settings: Option<(u64, Duration)>,
    ) -> Self {
        let language_guard = language_check_enabled.then(LanguageGuard::new);

        let cache = cache_settings.map(|(max_capacity, time_to_idle)| {
            Cache::builder()
                .max_capacity(max_capacity)
                .time_to_idle(time_to_idle)
                .build()
        });

        Self {
            delimiters,
            translation_service,
            language_guard,
            cache,
        }
    }

    pub fn delimiters(&self) -> &DelimiterSet {
        &self.delimiters
    }
}

#[async_trait]
pub trait PhraseServiceApi: Send + Sync {
    /// Parse every uploaded file, translate the pooled foreign-only phrases
    /// and return the final ordered pairs.
    ///
    /// A file that fails to parse is reported and skipped; it never fails the
    /// batch.
    async fn prepare_batch(
        &self,
        request: PhraseBatchRequest,
        progress: ProgressSender,
    ) -> Result<PhraseBatch, PhraseServiceError>;

    /// Render pairs back into a delimited text file.
    ///
    /// Fails when a field is blank or holds a line break or a recognized
    /// delimiter, since the file would not parse back into the same pairs.
    fn export_text(&self, request: &ExportRequest) -> Result<String, PhraseServiceError>;
}

#[async_trait]
impl PhraseServiceApi for PhraseService {
    async fn prepare_batch(
        &self,
        request: PhraseBatchRequest,
        progress: ProgressSender,
    ) -> Result<PhraseBatch, PhraseServiceError> {
        if request.files.is_empty() {
            return Err(PhraseServiceError::Invalid(
                "At least one file is required".to_string(),
            ));
        }

        let cache_key = request_digest(&request);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&cache_key).await {
                tracing::info!(
                    cache_key = %cache_key,
                    pairs = cached.pairs.len(),
                    "Phrase batch cache hit"
                );
                return Ok(cached);
            }
        }

        let native = request.native_language;
        let foreign = request.foreign_language;

        tracing::info!(
            file_count = request.files.len(),
            native = %native,
            foreign = %foreign,
            "Preparing phrase batch"
        );

        let mut reports = Vec::with_capacity(request.files.len());
        let mut pairs: Vec<PhrasePair> = Vec::new();
        let mut pooled: Vec<ForeignOnlyPhrase> = Vec::new();
        let mut warnings = Vec::new();

        for file in &request.files {
            match parse_file(&file.content, &self.delimiters) {
                Ok(parsed) => {
                    tracing::info!(
                        file = %file.name,
                        format = ?parsed.format(),
                        count = parsed.len(),
                        "File parsed"
                    );
                    reports.push(FileReport {
                        name: file.name.clone(),
                        status: FileStatus::Ok,
                        format: Some(parsed.format()),
                        count: parsed.len(),
                        message: parsed.summary(native, foreign),
                        error_kind: None,
                    });

                    match parsed {
                        ParsedFile::Bilingual {
                            pairs: file_pairs, ..
                        } => {
                            if let Some(warning) =
                                self.check_foreign_column(&file.name, &file_pairs, foreign)
                            {
                                warnings.push(warning);
                            }
                            pairs.extend(file_pairs);
                        }
                        ParsedFile::ForeignOnly { phrases } => pooled.extend(phrases),
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        file = %file.name,
                        error = %e,
                        kind = e.kind(),
                        "File rejected"
                    );
                    reports.push(FileReport {
                        name: file.name.clone(),
                        status: FileStatus::Error,
                        format: None,
                        count: 0,
                        message: format!("{}: {}", file.name, e),
                        error_kind: Some(e.kind().to_string()),
                    });
                }
            }
        }

        let translated_count = pooled.len();
        let mut translation_failures = Vec::new();
        if !pooled.is_empty() {
            let texts: Vec<String> = pooled.iter().map(|p| p.text.clone()).collect();
            let outcome = self
                .translation_service
                .translate(&texts, foreign, native, &progress)
                .await;

            warnings.extend(outcome.warnings.iter().map(|w| w.message.clone()));
            translation_failures = outcome.warnings;
            pairs.extend(
                pooled
                    .into_iter()
                    .zip(outcome.translations)
                    .map(|(phrase, translation)| phrase.into_pair(translation)),
            );
        }

        let batch = PhraseBatch {
            content_hash: pairs_digest(&pairs),
            files: reports,
            pairs,
            translated_count,
            warnings,
            translation_failures,
        };

        tracing::info!(
            content_hash = %batch.content_hash,
            pairs = batch.pairs.len(),
            translated = batch.translated_count,
            "Phrase batch ready"
        );

        if let Some(cache) = &self.cache {
            if batch.translation_failures.is_empty() {
                cache.insert(cache_key, batch.clone()).await;
            } else {
                tracing::debug!(
                    cache_key = %cache_key,
                    failures = batch.translation_failures.len(),
                    "Batch has failed translations, not caching"
                );
            }
        }

        Ok(batch)
    }

    fn export_text(&self, request: &ExportRequest) -> Result<String, PhraseServiceError> {
        for (index, pair) in request.pairs.iter().enumerate() {
            self.check_export_field(index, "native", &pair.native)?;
            self.check_export_field(index, "foreign", &pair.foreign)?;
        }

        let delimiter = self.delimiters.primary();
        Ok(request
            .pairs
            .iter()
            .map(|pair| format!("{}{}{}", pair.native, delimiter.as_char(), pair.foreign))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl PhraseService {
    fn check_export_field(
        &self,
        index: usize,
        field: &str,
        value: &str,
    ) -> Result<(), PhraseServiceError> {
        let problem = if value.trim().is_empty() {
            Some("is empty".to_string())
        } else if value.contains(['\n', '\r']) {
            Some("contains a line break".to_string())
        } else {
            self.delimiters
                .chars()
                .iter()
                .find(|d| value.contains(**d))
                .map(|d| format!("contains the delimiter '{}'", d))
        };

        match problem {
            Some(problem) => Err(PhraseServiceError::Invalid(format!(
                "Pair {}: {} text {}",
                index + 1,
                field,
                problem
            ))),
            None => Ok(()),
        }
    }

    fn check_foreign_column(
        &self,
        file_name: &str,
        pairs: &[PhrasePair],
        expected: LanguageCode,
    ) -> Option<String> {
        let guard = self.language_guard.as_ref()?;
        let detected = guard.mismatch(pairs.iter().map(|p| p.foreign.as_str()), expected)?;

        tracing::warn!(
            file = %file_name,
            expected = %expected,
            detected = %detected,
            "Foreign column does not look like the selected foreign language"
        );

        Some(format!(
            "{}: the second column looks like {}, but the selected foreign language is {}",
            file_name,
            detected.english_name(),
            expected.english_name()
        ))
    }
}

/// Digest of an ordered list of pairs
pub fn pairs_digest(pairs: &[PhrasePair]) -> String {
    pairs
        .iter()
        .fold(ContentDigest::new(), |digest, pair| {
            digest.field(&pair.native).field(&pair.foreign)
        })
        .finish()
}

fn request_digest(request: &PhraseBatchRequest) -> String {
    request
        .files
        .iter()
        .fold(
            ContentDigest::new()
                .field(request.native_language.as_str())
                .field(request.foreign_language.as_str()),
            |digest, file| digest.field(&file.name).field(&file.content),
        )
        .finish()
}

/// Suggested download name for an exported text file
pub fn export_file_name(native: LanguageCode, foreign: LanguageCode, count: usize) -> String {
    format!("edited_{}_{}_{}_phrases.txt", native, foreign, count)
}
