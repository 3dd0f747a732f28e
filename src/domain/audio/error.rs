use crate::error::AppError;
use std::time::Duration;

/// Why one half of a pair could not be rendered. Never fatal for the run:
/// the pair is skipped and the failure becomes a warning.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SynthesisFailure {
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
    #[error("speech synthesis timed out after {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("synthesis artifact error: {0}")]
    Artifact(String),
    #[error("could not decode synthesized audio: {0}")]
    Decode(String),
}

impl SynthesisFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            SynthesisFailure::Synthesis(_) => "synthesis",
            SynthesisFailure::Timeout(_) => "timeout",
            SynthesisFailure::Artifact(_) => "artifact",
            SynthesisFailure::Decode(_) => "decode",
        }
    }
}

/// Failures that abort a whole generation run
#[derive(Debug, thiserror::Error)]
pub enum AudioGenerationError {
    #[error("invalid generation config: {0}")]
    InvalidConfig(String),
    #[error("export failed: {0}")]
    Encoding(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AudioGenerationError> for AppError {
    fn from(err: AudioGenerationError) -> Self {
        match err {
            AudioGenerationError::InvalidConfig(msg) => AppError::BadRequest(msg),
            AudioGenerationError::Encoding(msg) => AppError::Internal(format!("export failed: {}", msg)),
            AudioGenerationError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}
