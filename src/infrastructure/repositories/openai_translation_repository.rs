use super::translation_repository::TranslationRepository;
use crate::domain::shared::preview;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Chat-completion translation
pub struct OpenAiTranslationRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTranslationRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    pub fn instruction(source_language: &str, target_language: &str) -> String {
        format!(
            "Translate the following {} text to {}. Return only the translation.",
            source_language, target_language
        )
    }

    /// The instruction travels as the system message and the phrase alone as
    /// the user message.
    pub fn build_request(
        model: &str,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<CreateChatCompletionRequest, String> {
        CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(Self::instruction(source_language, target_language))
                    .build()
                    .map_err(|e| e.to_string())?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(text)
                    .build()
                    .map_err(|e| e.to_string())?
                    .into(),
            ])
            .build()
            .map_err(|e| e.to_string())
    }
}

#[async_trait]
impl TranslationRepository for OpenAiTranslationRepository {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, String> {
        let request = Self::build_request(&self.model, text, source_language, target_language)?;

        let start_time = std::time::Instant::now();
        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                text_preview = %preview(text),
                "OpenAI translation call failed"
            );
            e.to_string()
        })?;

        let translation = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "empty translation response".to_string())?;

        tracing::debug!(
            model = %self.model,
            source = source_language,
            target = target_language,
            latency_ms = start_time.elapsed().as_millis(),
            "Translation completed"
        );

        Ok(translation)
    }
}
