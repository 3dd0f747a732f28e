use super::error::AudioGenerationError;
use crate::domain::language::LanguageCode;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const NATIVE_SPEED_RANGE: RangeInclusive<f32> = 1.0..=1.5;
pub const FOREIGN_SPEED_RANGE: RangeInclusive<f32> = 0.8..=1.2;
pub const PAUSE_MS_RANGE: RangeInclusive<u32> = 1000..=5000;

pub const DEFAULT_NATIVE_SPEED: f32 = 1.15;
pub const DEFAULT_FOREIGN_SPEED: f32 = 1.0;
pub const DEFAULT_PAUSE_MS: u32 = 3200;

fn default_native_speed() -> f32 {
    DEFAULT_NATIVE_SPEED
}

fn default_foreign_speed() -> f32 {
    DEFAULT_FOREIGN_SPEED
}

fn default_pause_ms() -> u32 {
    DEFAULT_PAUSE_MS
}

/// Parameters for one generation run. Passed by reference into the pipeline
/// and never mutated there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub native_language: LanguageCode,
    pub foreign_language: LanguageCode,
    #[serde(default = "default_native_speed")]
    pub native_speed: f32,
    #[serde(default = "default_foreign_speed")]
    pub foreign_speed: f32,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u32,
}

impl GenerationConfig {
    pub fn new(
        native_language: LanguageCode,
        foreign_language: LanguageCode,
        native_speed: f32,
        foreign_speed: f32,
        pause_ms: u32,
    ) -> Result<Self, AudioGenerationError> {
        let config = Self {
            native_language,
            foreign_language,
            native_speed,
            foreign_speed,
            pause_ms,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AudioGenerationError> {
        if !NATIVE_SPEED_RANGE.contains(&self.native_speed) {
            return Err(AudioGenerationError::InvalidConfig(format!(
                "native_speed must be between {} and {}, got {}",
                NATIVE_SPEED_RANGE.start(),
                NATIVE_SPEED_RANGE.end(),
                self.native_speed
            )));
        }
        if !FOREIGN_SPEED_RANGE.contains(&self.foreign_speed) {
            return Err(AudioGenerationError::InvalidConfig(format!(
                "foreign_speed must be between {} and {}, got {}",
                FOREIGN_SPEED_RANGE.start(),
                FOREIGN_SPEED_RANGE.end(),
                self.foreign_speed
            )));
        }
        if !PAUSE_MS_RANGE.contains(&self.pause_ms) {
            return Err(AudioGenerationError::InvalidConfig(format!(
                "pause_ms must be between {} and {}, got {}",
                PAUSE_MS_RANGE.start(),
                PAUSE_MS_RANGE.end(),
                self.pause_ms
            )));
        }
        Ok(())
    }

    pub fn speed_for(&self, side: Side) -> f32 {
        match side {
            Side::Native => self.native_speed,
            Side::Foreign => self.foreign_speed,
        }
    }

    pub fn language_for(&self, side: Side) -> LanguageCode {
        match side {
            Side::Native => self.native_language,
            Side::Foreign => self.foreign_language,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Native,
    Foreign,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Native => write!(f, "native"),
            Side::Foreign => write!(f, "foreign"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Native,
    Foreign,
    Silence,
}

impl From<Side> for SegmentKind {
    fn from(side: Side) -> Self {
        match side {
            Side::Native => SegmentKind::Native,
            Side::Foreign => SegmentKind::Foreign,
        }
    }
}

/// Position of one segment inside the concatenated track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub kind: SegmentKind,
    pub pair_index: usize,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub tempo_applied: bool,
}

/// A pair that was skipped because one of its halves failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairWarning {
    pub pair_index: usize,
    pub side: Side,
    pub preview: String,
    pub kind: String,
    pub message: String,
}

/// Running mono PCM concatenation
#[derive(Debug, Clone)]
pub struct AudioTrack {
    sample_rate: u32,
    samples: Vec<f32>,
    segments: Vec<TrackSegment>,
}

impl AudioTrack {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            samples: Vec::new(),
            segments: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    pub fn duration_ms(&self) -> u64 {
        self.samples_to_ms(self.samples.len())
    }

    /// Append a speech segment. The buffer is consumed.
    pub fn push_speech(
        &mut self,
        kind: SegmentKind,
        pair_index: usize,
        samples: Vec<f32>,
        tempo_applied: bool,
    ) {
        let start_ms = self.duration_ms();
        let duration_ms = self.samples_to_ms(samples.len());
        self.samples.extend(samples);
        self.segments.push(TrackSegment {
            kind,
            pair_index,
            start_ms,
            duration_ms,
            tempo_applied,
        });
    }

    pub fn push_silence(&mut self, pair_index: usize, duration_ms: u32) {
        let start_ms = self.duration_ms();
        let count = (self.sample_rate as u64 * duration_ms as u64 / 1000) as usize;
        self.samples.resize(self.samples.len() + count, 0.0);
        self.segments.push(TrackSegment {
            kind: SegmentKind::Silence,
            pair_index,
            start_ms,
            duration_ms: duration_ms as u64,
            tempo_applied: false,
        });
    }

    pub fn into_parts(self) -> (Vec<f32>, Vec<TrackSegment>) {
        (self.samples, self.segments)
    }

    fn samples_to_ms(&self, count: usize) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        count as u64 * 1000 / self.sample_rate as u64
    }
}

/// The exported result of one run
#[derive(Debug, Clone)]
pub struct GeneratedTrack {
    /// MP3 bytes
    pub audio: Vec<u8>,
    pub sample_rate: u32,
    pub duration_ms: u64,
    pub segments: Vec<TrackSegment>,
    pub warnings: Vec<PairWarning>,
    pub pairs_total: usize,
    pub pairs_rendered: usize,
}

impl GeneratedTrack {
    pub fn count(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }
}
