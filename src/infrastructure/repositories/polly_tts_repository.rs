use super::text_batches::split_into_batches;
use super::tts_repository::TtsRepository;
use crate::domain::language::LanguageCode;
use crate::domain::shared::preview;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Neural voice for a language. Polly has no Czech voice.
    fn voice_for_language(language: LanguageCode) -> Option<&'static str> {
        match language {
            LanguageCode::Czech => None,
            LanguageCode::English => Some("Joanna"),
            LanguageCode::German => Some("Vicki"),
            LanguageCode::Spanish => Some("Lucia"),
            LanguageCode::French => Some("Lea"),
        }
    }

    async fn call_polly(&self, text: &str, voice_name: &str) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice_name);

        tracing::debug!(
            voice = voice_name,
            text_length = text.len(),
            text_preview = %preview(text),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(Engine::Neural)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice = voice_name, "AWS Polly synthesize_speech failed");
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if text.trim().is_empty() {
            return Err("No text to speak".to_string());
        }

        let voice_name = Self::voice_for_language(language)
            .ok_or_else(|| format!("AWS Polly has no voice for language {}", language))?;

        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text, MAX_BATCH_SIZE);

        let mut audio_data = Vec::new();
        for batch in &batches {
            audio_data.extend(self.call_polly(batch, voice_name).await?);
        }

        tracing::info!(
            provider = "polly",
            voice = voice_name,
            language = %language,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.chars().count(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}
