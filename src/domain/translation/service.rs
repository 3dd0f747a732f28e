use crate::domain::language::LanguageCode;
use crate::domain::shared::{preview, send_progress, ProgressSender, ProgressUpdate};
use crate::infrastructure::repositories::TranslationRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A phrase whose translation failed and was replaced by a placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationWarning {
    pub index: usize,
    pub text: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct TranslationOutcome {
    /// Same length and order as the input
    pub translations: Vec<String>,
    pub warnings: Vec<TranslationWarning>,
}

pub struct TranslationService {
    translation_repo: Arc<dyn TranslationRepository>,
}

impl TranslationService {
    pub fn new(translation_repo: Arc<dyn TranslationRepository>) -> Self {
        Self { translation_repo }
    }

    /// Translate each text independently, one request at a time.
    ///
    /// A failed item never aborts the batch: it becomes a
    /// `[Translation error: ...]` placeholder plus a warning.
    pub async fn translate(
        &self,
        texts: &[String],
        source: LanguageCode,
        target: LanguageCode,
        progress: &ProgressSender,
    ) -> TranslationOutcome {
        let total = texts.len();
        let mut outcome = TranslationOutcome {
            translations: Vec::with_capacity(total),
            warnings: Vec::new(),
        };

        tracing::info!(
            count = total,
            source = %source,
            target = %target,
            "Translating foreign-only phrases"
        );

        for (index, text) in texts.iter().enumerate() {
            let translation = match self
                .translation_repo
                .translate(text, source.english_name(), target.english_name())
                .await
            {
                Ok(translation) => translation.trim().to_string(),
                Err(e) => {
                    tracing::warn!(
                        index = index,
                        text_preview = %preview(text),
                        error = %e,
                        "Translation failed, using placeholder"
                    );
                    outcome.warnings.push(TranslationWarning {
                        index,
                        text: text.clone(),
                        message: format!("Translation failed for: {}", text),
                    });
                    format!("[Translation error: {}]", e)
                }
            };
            outcome.translations.push(translation);

            send_progress(
                progress,
                ProgressUpdate::Translating {
                    current: index + 1,
                    total,
                    preview: preview(text),
                },
            )
            .await;
        }

        outcome
    }
}
