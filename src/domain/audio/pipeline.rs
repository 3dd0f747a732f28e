use super::error::{AudioGenerationError, SynthesisFailure};
use super::model::{AudioTrack, GeneratedTrack, GenerationConfig, PairWarning, SegmentKind, Side};
use super::normalize::TextNormalizer;
use super::tempo::{change_tempo, should_adjust_tempo};
use crate::domain::language::LanguageCode;
use crate::domain::phrases::PhrasePair;
use crate::domain::shared::{preview, send_progress, ProgressSender, ProgressUpdate};
use crate::infrastructure::audio::{decode_audio, resample, ArtifactStore, TrackEncoder};
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;
use std::time::Duration;

/// One synthesized half of a pair, ready to append
struct RenderedSpeech {
    samples: Vec<f32>,
    tempo_applied: bool,
}

/// Turns ordered phrase pairs into one exported track.
///
/// Pairs are processed strictly in order, one synthesis call at a time. A
/// failed or timed-out synthesis skips its pair with a warning; only the
/// final export can fail the run.
pub struct AudioPipeline {
    tts_repo: Arc<dyn TtsRepository>,
    encoder: Arc<dyn TrackEncoder>,
    normalizer: TextNormalizer,
    synthesis_timeout: Duration,
    sample_rate: u32,
}

impl AudioPipeline {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        encoder: Arc<dyn TrackEncoder>,
        normalizer: TextNormalizer,
        synthesis_timeout: Duration,
        sample_rate: u32,
    ) -> Self {
        Self {
            tts_repo,
            encoder,
            normalizer,
            synthesis_timeout,
            sample_rate,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.encoder.content_type()
    }

    pub async fn generate(
        &self,
        pairs: &[PhrasePair],
        config: &GenerationConfig,
        progress: &ProgressSender,
    ) -> Result<GeneratedTrack, AudioGenerationError> {
        config.validate()?;

        let store = ArtifactStore::new()?;
        let total = pairs.len();
        let mut track = AudioTrack::new(self.sample_rate);
        let mut warnings = Vec::new();
        let mut rendered = 0usize;

        tracing::info!(
            pairs = total,
            native = %config.native_language,
            foreign = %config.foreign_language,
            native_speed = config.native_speed,
            foreign_speed = config.foreign_speed,
            pause_ms = config.pause_ms,
            artifacts = %store.path().display(),
            "Starting audio generation"
        );

        for (index, pair) in pairs.iter().enumerate() {
            let native_text = self.normalizer.normalize(&pair.native, config.native_language);
            let foreign_text = self
                .normalizer
                .normalize(&pair.foreign, config.foreign_language);

            if foreign_text.is_empty() {
                tracing::debug!(pair_index = index, "Empty foreign text, skipping pair");
            } else {
                match self
                    .render_pair(&store, index, &native_text, &foreign_text, config)
                    .await
                {
                    Ok((native, foreign)) => {
                        track.push_speech(
                            SegmentKind::Native,
                            index,
                            native.samples,
                            native.tempo_applied,
                        );
                        track.push_speech(
                            SegmentKind::Foreign,
                            index,
                            foreign.samples,
                            foreign.tempo_applied,
                        );
                        track.push_silence(index, config.pause_ms);
                        rendered += 1;
                    }
                    Err(warning) => {
                        tracing::warn!(
                            pair_index = index,
                            side = %warning.side,
                            kind = %warning.kind,
                            error = %warning.message,
                            "Skipping pair"
                        );
                        warnings.push(warning);
                    }
                }
            }

            send_progress(
                progress,
                ProgressUpdate::Generating {
                    current: index + 1,
                    total,
                    preview: preview(&pair.foreign),
                },
            )
            .await;
        }

        if rendered == 0 {
            tracing::warn!(pairs = total, "No pair produced audio, exporting an empty track");
        }

        send_progress(progress, ProgressUpdate::Encoding).await;

        let duration_ms = track.duration_ms();
        let (samples, segments) = track.into_parts();
        let audio = self
            .encoder
            .encode(&samples, self.sample_rate)
            .await
            .map_err(AudioGenerationError::Encoding)?;

        tracing::info!(
            pairs_total = total,
            pairs_rendered = rendered,
            warnings = warnings.len(),
            duration_ms = duration_ms,
            audio_size = audio.len(),
            "Audio generation finished"
        );

        send_progress(progress, ProgressUpdate::Finished).await;

        Ok(GeneratedTrack {
            audio,
            sample_rate: self.sample_rate,
            duration_ms,
            segments,
            warnings,
            pairs_total: total,
            pairs_rendered: rendered,
        })
    }

    /// Both halves or neither: the foreign half is not attempted once the
    /// native half has failed.
    async fn render_pair(
        &self,
        store: &ArtifactStore,
        index: usize,
        native_text: &str,
        foreign_text: &str,
        config: &GenerationConfig,
    ) -> Result<(RenderedSpeech, RenderedSpeech), PairWarning> {
        let native = self
            .render_side(store, index, Side::Native, native_text, config)
            .await
            .map_err(|e| pair_warning(index, Side::Native, native_text, e))?;
        let foreign = self
            .render_side(store, index, Side::Foreign, foreign_text, config)
            .await
            .map_err(|e| pair_warning(index, Side::Foreign, foreign_text, e))?;
        Ok((native, foreign))
    }

    async fn render_side(
        &self,
        store: &ArtifactStore,
        index: usize,
        side: Side,
        text: &str,
        config: &GenerationConfig,
    ) -> Result<RenderedSpeech, SynthesisFailure> {
        let language = config.language_for(side);
        let name = format!("{}_{}.mp3", side, index);

        let encoded = self.synthesize_artifact(store, &name, text, language).await?;

        let speed = config.speed_for(side);
        let sample_rate = self.sample_rate;

        tokio::task::spawn_blocking(move || {
            let decoded = decode_audio(&encoded).map_err(SynthesisFailure::Decode)?;
            let duration_secs = decoded.duration_secs();
            let samples = resample(&decoded.samples, decoded.sample_rate, sample_rate)
                .map_err(SynthesisFailure::Decode)?;

            if should_adjust_tempo(duration_secs, speed) {
                Ok(RenderedSpeech {
                    samples: change_tempo(&samples, sample_rate, speed),
                    tempo_applied: true,
                })
            } else {
                Ok(RenderedSpeech {
                    samples,
                    tempo_applied: false,
                })
            }
        })
        .await
        .map_err(|e| SynthesisFailure::Decode(e.to_string()))?
    }

    /// Synthesize, persist the result as a transient artifact, wait for it and
    /// read it back. The artifact is deleted once read.
    ///
    /// Only the wait for a non-empty artifact is bounded by the synthesis
    /// timeout. Provider calls run until the provider answers or fails.
    async fn synthesize_artifact(
        &self,
        store: &ArtifactStore,
        name: &str,
        text: &str,
        language: LanguageCode,
    ) -> Result<Vec<u8>, SynthesisFailure> {
        let audio = self
            .tts_repo
            .synthesize(text, language)
            .await
            .map_err(SynthesisFailure::Synthesis)?;

        let path = store
            .persist(name, &audio)
            .await
            .map_err(|e| SynthesisFailure::Artifact(e.to_string()))?;

        if tokio::time::timeout(self.synthesis_timeout, store.wait_ready(&path))
            .await
            .is_err()
        {
            tracing::warn!(
                artifact = %path.display(),
                timeout_ms = self.synthesis_timeout.as_millis() as u64,
                "Synthesized artifact never became ready"
            );
            store.remove(&path).await;
            return Err(SynthesisFailure::Timeout(self.synthesis_timeout));
        }

        store
            .take(&path)
            .await
            .map_err(|e| SynthesisFailure::Artifact(e.to_string()))
    }
}

fn pair_warning(index: usize, side: Side, text: &str, failure: SynthesisFailure) -> PairWarning {
    PairWarning {
        pair_index: index,
        side,
        preview: preview(text),
        kind: failure.kind().to_string(),
        message: format!("Pair {} skipped, {} audio: {}", index + 1, side, failure),
    }
}
