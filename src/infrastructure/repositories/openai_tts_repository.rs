use super::text_batches::split_into_batches;
use super::tts_repository::TtsRepository;
use crate::domain::language::LanguageCode;
use crate::domain::shared::preview;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI has a limit of 4096 characters per request
const MAX_BATCH_SIZE: usize = 4096;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// OpenAI voices are multilingual; these pairings sounded most natural
    fn voice_for_language(language: LanguageCode) -> &'static str {
        match language {
            LanguageCode::Czech => "nova",
            LanguageCode::English => "alloy",
            LanguageCode::German => "onyx",
            LanguageCode::Spanish => "echo",
            LanguageCode::French => "shimmer",
        }
    }

    fn parse_voice(voice: &str) -> Voice {
        match voice.to_lowercase().as_str() {
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }

    async fn call_openai(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        tracing::debug!(
            model = %self.model,
            voice = voice,
            text_length = text.len(),
            text_preview = %preview(text),
            "Calling OpenAI TTS API"
        );

        let model = match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        };

        let request = CreateSpeechRequest {
            model,
            input: text.to_string(),
            voice: Self::parse_voice(voice),
            response_format: None, // MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = voice,
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        Ok(response.bytes.to_vec())
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if text.trim().is_empty() {
            return Err("No text to speak".to_string());
        }

        let start_time = std::time::Instant::now();

        let voice = if self.default_voice.is_empty() {
            Self::voice_for_language(language).to_string()
        } else {
            self.default_voice.clone()
        };

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        let mut audio_data = Vec::new();
        for batch in &batches {
            audio_data.extend(self.call_openai(batch, &voice).await?);
        }

        tracing::info!(
            provider = "openai",
            model = %self.model,
            voice = %voice,
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
