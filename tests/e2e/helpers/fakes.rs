use async_trait::async_trait;
use parking_lot::Mutex;
use superlearning_backend::domain::language::LanguageCode;
use superlearning_backend::infrastructure::audio::{encode_wav, TrackEncoder};
use superlearning_backend::infrastructure::repositories::{TranslationRepository, TtsRepository};

/// Speech synthesis stand-in that answers with a WAV sine tone.
///
/// Texts of up to three characters produce 200 ms of audio, anything longer a
/// full second. A text containing "fail" is rejected.
pub struct FakeTts {
    sample_rate: u32,
    calls: Mutex<Vec<(String, LanguageCode)>>,
}

impl FakeTts {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every (text, language) pair received so far, in call order
    pub fn calls(&self) -> Vec<(String, LanguageCode)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TtsRepository for FakeTts {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        self.calls.lock().push((text.to_string(), language));

        if text.is_empty() {
            return Err("No text to speak".to_string());
        }
        if text.contains("fail") {
            return Err("voice rejected the text".to_string());
        }

        let secs = if text.chars().count() <= 3 { 0.2 } else { 1.0 };
        let len = (self.sample_rate as f32 * secs) as usize;
        let samples: Vec<f32> = (0..len)
            .map(|n| {
                (2.0 * std::f32::consts::PI * 330.0 * n as f32 / self.sample_rate as f32).sin()
                    * 0.5
            })
            .collect();

        encode_wav(&samples, self.sample_rate)
    }
}

/// Translation stand-in: "Hola" from Spanish to Czech becomes "Hola (Czech)".
/// A text containing "boom" fails.
#[derive(Default)]
pub struct FakeTranslator {
    calls: Mutex<Vec<String>>,
}

impl FakeTranslator {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TranslationRepository for FakeTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, String> {
        self.calls.lock().push(text.to_string());

        if text.contains("boom") {
            return Err("model unavailable".to_string());
        }
        Ok(format!("{} ({})", text, target_language))
    }
}

/// Encodes the finished track as WAV instead of shelling out to ffmpeg
pub struct WavEncoder;

#[async_trait]
impl TrackEncoder for WavEncoder {
    async fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, String> {
        encode_wav(samples, sample_rate)
    }
}
