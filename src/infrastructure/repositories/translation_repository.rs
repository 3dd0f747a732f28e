use async_trait::async_trait;

/// Repository for free-text translation
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translate one text. Languages are human-readable names ("Spanish"),
    /// not codes.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, String>;
}
