use super::text_batches::split_into_batches;
use super::tts_repository::TtsRepository;
use crate::domain::language::LanguageCode;
use crate::domain::shared::preview;
use async_trait::async_trait;

/// Google Translate TTS rejects longer requests
const MAX_BATCH_CHARS: usize = 100;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    base_url: String,
    http_client: reqwest::Client,
}

impl GoogleTtsRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    fn request_url(&self, text: &str, language: LanguageCode, index: usize, total: usize) -> String {
        format!(
            "{}/translate_tts?ie=UTF-8&q={}&tl={}&total={}&idx={}&textlen={}&client=tw-ob",
            self.base_url,
            urlencoding::encode(text),
            language.as_str(),
            total,
            index,
            text.chars().count()
        )
    }

    async fn call_google(
        &self,
        text: &str,
        language: LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        tracing::debug!(
            language = %language,
            batch_index = index,
            text_length = text.len(),
            text_preview = %preview(text),
            "Calling Google TTS"
        );

        let response = self
            .http_client
            .get(self.request_url(text, language, index, total))
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = %language, "Google TTS request failed");
                format!("Google TTS request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, language = %language, "Google TTS returned an error");
            return Err(format!("Google TTS returned {}", status));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS response: {}", e))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        if text.trim().is_empty() {
            return Err("No text to speak".to_string());
        }

        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text, MAX_BATCH_CHARS);

        // MP3 frames are self-delimiting, so batches concatenate directly
        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio = self.call_google(batch, language, index, batches.len()).await?;
            merged_audio.extend(audio);
        }

        tracing::info!(
            provider = "google",
            language = %language,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.chars().count(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
