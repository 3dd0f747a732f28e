use super::cache::{GenerationCache, StoredGeneration};
use super::dto::{GenerateRequest, GenerationReport};
use super::error::AudioGenerationError;
use super::model::GenerationConfig;
use super::pipeline::AudioPipeline;
use crate::domain::phrases::PhrasePair;
use crate::domain::shared::{ContentDigest, ProgressSender};
use async_trait::async_trait;
use std::sync::Arc;

pub struct AudioService {
    pipeline: AudioPipeline,
    cache: GenerationCache,
}

impl AudioService {
    pub fn new(pipeline: AudioPipeline, cache: GenerationCache) -> Self {
        Self { pipeline, cache }
    }

    pub fn content_type(&self) -> &'static str {
        self.pipeline.content_type()
    }
}

#[async_trait]
pub trait AudioServiceApi: Send + Sync {
    /// Generate a track for the given pairs, or reuse an identical previous run
    async fn generate(
        &self,
        request: GenerateRequest,
        progress: ProgressSender,
    ) -> Result<GenerationReport, AudioGenerationError>;

    /// A previously generated track by content hash
    async fn fetch(&self, hash: &str) -> Option<Arc<StoredGeneration>>;

    /// Drop a memoized track. Returns whether it existed.
    async fn invalidate(&self, hash: &str) -> bool;
}

#[async_trait]
impl AudioServiceApi for AudioService {
    async fn generate(
        &self,
        request: GenerateRequest,
        progress: ProgressSender,
    ) -> Result<GenerationReport, AudioGenerationError> {
        request.config.validate()?;

        let hash = generation_digest(&request.pairs, &request.config);

        if let Some(stored) = self.cache.get(&hash).await {
            tracing::info!(
                content_hash = %hash,
                audio_size = stored.track.audio.len(),
                "Generation cache hit - returning cached track"
            );
            return Ok(report(&hash, &stored, true));
        }

        let track = self
            .pipeline
            .generate(&request.pairs, &request.config, &progress)
            .await?;

        let stored = Arc::new(StoredGeneration {
            config: request.config,
            track,
        });
        self.cache.insert(hash.clone(), stored.clone()).await;

        tracing::info!(
            content_hash = %hash,
            audio_size = stored.track.audio.len(),
            "Generated track cached"
        );

        Ok(report(&hash, &stored, false))
    }

    async fn fetch(&self, hash: &str) -> Option<Arc<StoredGeneration>> {
        self.cache.get(hash).await
    }

    async fn invalidate(&self, hash: &str) -> bool {
        let removed = self.cache.invalidate(hash).await;
        tracing::info!(content_hash = %hash, removed = removed, "Generation invalidated");
        removed
    }
}

fn report(hash: &str, stored: &StoredGeneration, cached: bool) -> GenerationReport {
    GenerationReport {
        content_hash: hash.to_string(),
        file_name: stored.file_name(),
        download_url: format!("/api/audio/{}", hash),
        pairs_total: stored.track.pairs_total,
        pairs_rendered: stored.track.pairs_rendered,
        duration_ms: stored.track.duration_ms,
        segments: stored.track.segments.clone(),
        warnings: stored.track.warnings.clone(),
        cached,
    }
}

/// Digest of everything that affects the rendered audio
pub fn generation_digest(pairs: &[PhrasePair], config: &GenerationConfig) -> String {
    let digest = ContentDigest::new()
        .field(config.native_language.as_str())
        .field(config.foreign_language.as_str())
        .field(format!("{:.3}", config.native_speed))
        .field(format!("{:.3}", config.foreign_speed))
        .field(config.pause_ms.to_string());

    pairs
        .iter()
        .fold(digest, |digest, pair| digest.field(&pair.native).field(&pair.foreign))
        .finish()
}
