use crate::domain::language::LanguageCode;
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying provider (Google Translate TTS, OpenAI, AWS Polly).
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed and merging the audio in order
/// - Provider-specific voice selection
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech for a given language
    ///
    /// Returns encoded audio (MP3 for every built-in provider)
    ///
    /// # Errors
    /// Returns error if the text is empty, the language is unsupported by the
    /// provider, or the provider is unavailable
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String>;
}
